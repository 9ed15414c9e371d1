//! GraphQL API
//!
//! This module provides the gateway's single API surface using
//! async-graphql: typed entities over the TMDB REST upstream, with nested
//! fields resolved lazily per request.
//!
//! Layout follows one file per concern: `types.rs` for the graph types
//! and their field resolvers, `queries/` for the per-domain roots merged
//! into `QueryRoot`, `helpers.rs` for wire-to-graph conversions, and
//! `schema.rs` for assembly.

pub mod helpers;
pub mod queries;
mod schema;
pub mod types;

pub use schema::{GatewaySchema, QueryRoot, build_schema};
