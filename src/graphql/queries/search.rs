use super::prelude::*;

#[derive(Default)]
pub struct SearchQueries;

#[Object]
impl SearchQueries {
    /// Search movies and TV shows by name.
    ///
    /// Upstream multi-search also returns people and other media types;
    /// those are dropped, and the remaining hits keep their upstream
    /// relative order.
    async fn search(&self, ctx: &Context<'_>, name: String) -> Result<Option<Vec<SearchResult>>> {
        let tmdb = ctx.data_unchecked::<Arc<TmdbClient>>();

        let items = tmdb
            .search_multi(&name)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(Some(
            items.into_iter().filter_map(search_item_to_graphql).collect(),
        ))
    }
}
