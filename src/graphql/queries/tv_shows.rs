use super::prelude::*;

#[derive(Default)]
pub struct TvShowQueries;

#[Object]
impl TvShowQueries {
    /// Discover TV shows by popularity, one page at a time. The page and
    /// total count come straight from the upstream listing.
    async fn get_tv_shows(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1, validator(minimum = 1))] page: u32,
    ) -> Result<TvShowPage> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let listing = tmdb
            .discover_tv(page)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(tv_show_page_to_graphql(listing))
    }

    /// The top rated TV shows on TMDB
    async fn get_top_rated_tv_shows(&self, ctx: &Context<'_>) -> Result<Vec<TvShow>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let shows = tmdb
            .top_rated_tv()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(shows.into_iter().map(tv_show_to_graphql).collect())
    }

    /// TV shows currently popular on TMDB
    async fn get_popular_tv_shows(&self, ctx: &Context<'_>) -> Result<Vec<TvShow>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let shows = tmdb
            .popular_tv()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(shows.into_iter().map(tv_show_to_graphql).collect())
    }
}
