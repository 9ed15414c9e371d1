//! Service layer: clients for external collaborators
//!
//! The only collaborator is the TMDB REST API; the GraphQL layer never
//! talks to the network directly.

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
