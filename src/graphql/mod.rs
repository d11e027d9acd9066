//! GraphQL API (async-graphql): `me`, `addUser`, `login`, `saveBook`,
//! `removeBook` and the computed `User.bookCount`.

pub mod auth;
mod schema;
pub mod types;

pub use schema::{build_schema, BookSchema, MutationRoot, QueryRoot};
