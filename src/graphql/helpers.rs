// Conversions from TMDB wire types to GraphQL types, shared across the
// query modules and the lazy field resolvers.

use crate::graphql::types::{
    Author, Cast, Creator, Genre, Movie, MovieDetails, MoviePage, Review, SearchResult, Season,
    TvShow, TvShowDetails, TvShowPage, Video,
};
use crate::services::tmdb::{
    TmdbCastMember, TmdbCreator, TmdbGenre, TmdbMovieDetails, TmdbMovieSummary, TmdbPage,
    TmdbReview, TmdbSearchItem, TmdbSeason, TmdbTvDetails, TmdbTvSummary, TmdbVideo,
};

pub(crate) fn movie_to_graphql(m: TmdbMovieSummary) -> Movie {
    Movie {
        id: m.id,
        title: m.title,
        poster_path: m.poster_path,
        release_date: m.release_date,
        vote_average: m.vote_average,
    }
}

pub(crate) fn tv_show_to_graphql(t: TmdbTvSummary) -> TvShow {
    TvShow {
        id: t.id,
        name: t.name,
        poster_path: t.poster_path,
        first_air_date: t.first_air_date,
        vote_average: t.vote_average,
    }
}

pub(crate) fn movie_page_to_graphql(p: TmdbPage<TmdbMovieSummary>) -> MoviePage {
    MoviePage {
        page: p.page,
        results: p.results.into_iter().map(movie_to_graphql).collect(),
        total_results: p.total_results,
    }
}

pub(crate) fn tv_show_page_to_graphql(p: TmdbPage<TmdbTvSummary>) -> TvShowPage {
    TvShowPage {
        page: p.page,
        results: p.results.into_iter().map(tv_show_to_graphql).collect(),
        total_results: p.total_results,
    }
}

pub(crate) fn movie_details_to_graphql(d: TmdbMovieDetails) -> MovieDetails {
    MovieDetails {
        genres: d.genres.map(|g| g.into_iter().map(genre_to_graphql).collect()),
        id: d.id,
        poster_path: d.poster_path,
        release_date: d.release_date,
        revenue: d.revenue,
        runtime: d.runtime,
        title: d.title,
        vote_average: d.vote_average,
    }
}

pub(crate) fn tv_details_to_graphql(d: TmdbTvDetails) -> TvShowDetails {
    TvShowDetails {
        created_by: d
            .created_by
            .map(|c| c.into_iter().map(creator_to_graphql).collect()),
        first_air_date: d.first_air_date,
        genres: d.genres.map(|g| g.into_iter().map(genre_to_graphql).collect()),
        id: d.id,
        last_air_date: d.last_air_date,
        name: d.name,
        number_of_episodes: d.number_of_episodes,
        number_of_seasons: d.number_of_seasons,
        poster_path: d.poster_path,
        seasons: d
            .seasons
            .map(|s| s.into_iter().map(season_to_graphql).collect()),
        vote_average: d.vote_average,
    }
}

fn genre_to_graphql(g: TmdbGenre) -> Genre {
    Genre {
        id: g.id,
        name: g.name,
    }
}

fn season_to_graphql(s: TmdbSeason) -> Season {
    Season {
        air_date: s.air_date,
        episode_count: s.episode_count,
        id: s.id,
        name: s.name,
        poster_path: s.poster_path,
        season_number: s.season_number,
    }
}

fn creator_to_graphql(c: TmdbCreator) -> Creator {
    Creator {
        id: c.id,
        name: c.name,
        profile_path: c.profile_path,
    }
}

pub(crate) fn cast_to_graphql(c: TmdbCastMember) -> Cast {
    Cast {
        id: c.id,
        name: c.name,
        profile_path: c.profile_path,
        character: c.character,
    }
}

pub(crate) fn review_to_graphql(r: TmdbReview) -> Review {
    Review {
        author_details: r.author_details.map(|a| Author {
            name: a.name,
            avatar_path: a.avatar_path,
            rating: a.rating,
        }),
        content: r.content,
        id: r.id,
    }
}

pub(crate) fn video_to_graphql(v: TmdbVideo) -> Video {
    Video {
        name: v.name,
        key: v.key,
        site: v.site,
        video_type: v.video_type,
        id: v.id,
    }
}

/// Tag one search item with its graph variant; items that are neither a
/// movie nor a TV show produce no entry.
pub(crate) fn search_item_to_graphql(item: TmdbSearchItem) -> Option<SearchResult> {
    match item {
        TmdbSearchItem::Movie(m) => Some(SearchResult::Movie(movie_to_graphql(m))),
        TmdbSearchItem::Tv(t) => Some(SearchResult::TvShow(tv_show_to_graphql(t))),
        TmdbSearchItem::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_item_person_is_dropped() {
        let item: TmdbSearchItem =
            serde_json::from_value(json!({ "media_type": "person", "id": 3, "name": "Someone" }))
                .unwrap();
        assert!(search_item_to_graphql(item).is_none());
    }

    #[test]
    fn test_search_item_movie_keeps_fields() {
        let item: TmdbSearchItem = serde_json::from_value(
            json!({ "media_type": "movie", "id": 5, "title": "X", "vote_average": 7.2 }),
        )
        .unwrap();

        match search_item_to_graphql(item) {
            Some(SearchResult::Movie(m)) => {
                assert_eq!(m.id, 5);
                assert_eq!(m.title.as_deref(), Some("X"));
                assert_eq!(m.vote_average, Some(7.2));
            }
            other => panic!("expected a Movie variant, got {other:?}"),
        }
    }

    #[test]
    fn test_search_filtering_preserves_order_and_length() {
        let items: Vec<TmdbSearchItem> = serde_json::from_value(json!([
            { "media_type": "movie", "id": 1, "title": "A" },
            { "media_type": "person", "id": 2, "name": "B" },
            { "media_type": "tv", "id": 3, "name": "C" },
            { "media_type": "movie", "id": 4, "title": "D" }
        ]))
        .unwrap();

        let tagged: Vec<SearchResult> = items
            .into_iter()
            .filter_map(search_item_to_graphql)
            .collect();

        assert_eq!(tagged.len(), 3);
        assert!(matches!(&tagged[0], SearchResult::Movie(m) if m.id == 1));
        assert!(matches!(&tagged[1], SearchResult::TvShow(t) if t.id == 3));
        assert!(matches!(&tagged[2], SearchResult::Movie(m) if m.id == 4));
    }

    #[test]
    fn test_movie_page_echoes_upstream_counts() {
        let page: TmdbPage<TmdbMovieSummary> = serde_json::from_value(json!({
            "page": 3,
            "results": [{ "id": 1, "title": "A" }],
            "total_results": 1200
        }))
        .unwrap();

        let page = movie_page_to_graphql(page);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_results, 1200);
        assert_eq!(page.results.len(), 1);
    }
}
