pub mod movies;
pub mod search;
pub mod tv_shows;

pub use movies::MovieQueries;
pub use search::SearchQueries;
pub use tv_shows::TvShowQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::TmdbClient;
}
