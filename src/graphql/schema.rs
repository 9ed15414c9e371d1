//! GraphQL schema definition
//!
//! The gateway is query-only: one root object merged from the per-domain
//! query modules, no mutations, no subscriptions. The TMDB client is the
//! only piece of shared context.

use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use super::queries::{MovieQueries, SearchQueries, TvShowQueries};
use crate::services::TmdbClient;

/// The GraphQL schema type
pub type GatewaySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(MovieQueries, TvShowQueries, SearchQueries);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(tmdb: Arc<TmdbClient>) -> GatewaySchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(tmdb)
        .finish()
}
