//! API route definitions
//!
//! The primary API is GraphQL at /graphql; the only REST surface is the
//! health endpoints.

pub mod health;
