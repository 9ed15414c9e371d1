use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// Discover movies by popularity, one page at a time. The page and
    /// total count come straight from the upstream listing.
    async fn get_movies(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1, validator(minimum = 1))] page: u32,
    ) -> Result<MoviePage> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let listing = tmdb
            .discover_movies(page)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(movie_page_to_graphql(listing))
    }

    /// The top rated movies on TMDB
    async fn get_top_rated_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let movies = tmdb
            .top_rated_movies()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(movies.into_iter().map(movie_to_graphql).collect())
    }

    /// Movies with an upcoming release date
    async fn get_upcoming_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let movies = tmdb
            .upcoming_movies()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(movies.into_iter().map(movie_to_graphql).collect())
    }

    /// Movies currently popular on TMDB
    async fn get_popular_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let movies = tmdb
            .popular_movies()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(movies.into_iter().map(movie_to_graphql).collect())
    }
}
