//! Book bookmarking service: a GraphQL API over a MongoDB users collection
//! with JWT authentication, plus the client data layer that consumes it.

pub mod api;
pub mod client;
pub mod config;
pub mod database;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
