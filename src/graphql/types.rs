//! GraphQL type definitions
//!
//! These types mirror the TMDB wire types but are decorated with
//! async-graphql attributes. Entity fields keep the upstream snake_case
//! spelling so the graph contract matches what the frontend already
//! consumes.
//!
//! `Movie` and `TvShow` carry four derived relations (`details`, `credits`,
//! `reviews`, `videos`) that resolve lazily: each one issues exactly one
//! upstream call keyed by the parent `id`, and only when the query asks
//! for it. The relations are independent, so the engine is free to run
//! them concurrently for one entity.

use std::sync::Arc;

use async_graphql::{
    ComplexObject, Context, PathSegment, QueryPathNode, QueryPathSegment, ServerError,
    SimpleObject, Union,
};

use crate::graphql::helpers::*;
use crate::services::{TmdbClient, TmdbError};

/// Record an upstream failure as a field-level error.
///
/// The failed field must still resolve (to null) so sibling fields keep
/// their data; returning `Err` from a resolver would drop the key from
/// the data tree entirely instead of nulling it.
fn report_upstream_error(ctx: &Context<'_>, err: TmdbError) {
    let mut error = ServerError::new(err.to_string(), Some(ctx.item.pos));
    if let Some(node) = ctx.path_node.as_ref() {
        error.path = error_path(node);
    }
    ctx.add_error(error);
}

fn error_path(node: &QueryPathNode) -> Vec<PathSegment> {
    let mut segments = match node.parent {
        Some(parent) => error_path(parent),
        None => Vec::new(),
    };
    segments.push(match node.segment {
        QueryPathSegment::Index(i) => PathSegment::Index(i),
        QueryPathSegment::Name(name) => PathSegment::Field(name.to_string()),
    });
    segments
}

/// A movie from a discover/top-rated/upcoming listing
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct Movie {
    pub id: i32,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

#[ComplexObject]
impl Movie {
    /// Full details for this movie, fetched on demand
    async fn details(&self, ctx: &Context<'_>) -> Option<MovieDetails> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.movie_details(self.id).await {
            Ok(details) => Some(movie_details_to_graphql(details)),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }

    /// People credited in this movie
    async fn credits(&self, ctx: &Context<'_>) -> Option<Vec<Cast>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.movie_credits(self.id).await {
            Ok(cast) => Some(cast.into_iter().map(cast_to_graphql).collect()),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }

    /// Reviews for this movie, first page only
    async fn reviews(&self, ctx: &Context<'_>) -> Option<Vec<Review>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.movie_reviews(self.id).await {
            Ok(reviews) => Some(reviews.into_iter().map(review_to_graphql).collect()),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }

    /// Trailer videos for this movie
    async fn videos(&self, ctx: &Context<'_>) -> Option<Vec<Video>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.movie_videos(self.id).await {
            Ok(videos) => Some(videos.into_iter().map(video_to_graphql).collect()),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }
}

/// A TV show from a discover/top-rated listing
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct TvShow {
    pub id: i32,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
}

#[ComplexObject]
impl TvShow {
    /// Full details for this show, fetched on demand
    async fn details(&self, ctx: &Context<'_>) -> Option<TvShowDetails> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.tv_details(self.id).await {
            Ok(details) => Some(tv_details_to_graphql(details)),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }

    /// People credited in this show
    async fn credits(&self, ctx: &Context<'_>) -> Option<Vec<Cast>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.tv_credits(self.id).await {
            Ok(cast) => Some(cast.into_iter().map(cast_to_graphql).collect()),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }

    /// Reviews for this show, first page only
    async fn reviews(&self, ctx: &Context<'_>) -> Option<Vec<Review>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.tv_reviews(self.id).await {
            Ok(reviews) => Some(reviews.into_iter().map(review_to_graphql).collect()),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }

    /// Trailer videos for this show
    async fn videos(&self, ctx: &Context<'_>) -> Option<Vec<Video>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();
        match tmdb.tv_videos(self.id).await {
            Ok(videos) => Some(videos.into_iter().map(video_to_graphql).collect()),
            Err(e) => {
                report_upstream_error(ctx, e);
                None
            }
        }
    }
}

/// Paged discover-movie listing; page and total are echoed from upstream
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Movies", rename_fields = "snake_case")]
pub struct MoviePage {
    pub page: i32,
    pub results: Vec<Movie>,
    pub total_results: i32,
}

/// Paged discover-tv listing; page and total are echoed from upstream
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "TvShows", rename_fields = "snake_case")]
pub struct TvShowPage {
    pub page: i32,
    pub results: Vec<TvShow>,
    pub total_results: i32,
}

/// A search hit is either a movie or a TV show; other upstream media
/// types never reach this union
#[derive(Debug, Clone, Union)]
#[graphql(name = "Search")]
pub enum SearchResult {
    Movie(Movie),
    TvShow(TvShow),
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct MovieDetails {
    pub genres: Option<Vec<Genre>>,
    pub id: i32,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<i64>,
    pub runtime: Option<i32>,
    pub title: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct TvShowDetails {
    pub created_by: Option<Vec<Creator>>,
    pub first_air_date: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub id: i32,
    pub last_air_date: Option<String>,
    pub name: Option<String>,
    pub number_of_episodes: Option<i32>,
    pub number_of_seasons: Option<i32>,
    pub poster_path: Option<String>,
    pub seasons: Option<Vec<Season>>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Genres")]
pub struct Genre {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Seasons", rename_fields = "snake_case")]
pub struct Season {
    pub air_date: Option<String>,
    pub episode_count: Option<i32>,
    pub id: i32,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub season_number: Option<i32>,
}

/// The people that created a TV show, used in the show details type
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Creators", rename_fields = "snake_case")]
pub struct Creator {
    pub id: i32,
    pub name: Option<String>,
    pub profile_path: Option<String>,
}

/// Movie/TV show cast member
#[derive(Debug, Clone, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Cast {
    pub id: i32,
    pub name: Option<String>,
    pub profile_path: Option<String>,
    pub character: Option<String>,
}

/// A movie/TV show review
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Reviews", rename_fields = "snake_case")]
pub struct Review {
    pub author_details: Option<Author>,
    pub content: Option<String>,
    pub id: Option<String>,
}

/// A review author
#[derive(Debug, Clone, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct Author {
    pub name: Option<String>,
    pub avatar_path: Option<String>,
    pub rating: Option<f64>,
}

/// A trailer video for a movie or TV show
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Videos")]
pub struct Video {
    pub name: Option<String>,
    pub key: Option<String>,
    pub site: Option<String>,
    #[graphql(name = "type")]
    pub video_type: Option<String>,
    pub id: Option<String>,
}
