//! GraphQL schema definition: one root object per operation type.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID};

use super::auth::ContextExt;
use super::types::{Auth, BookInput, User};
use crate::database::UserStore;
use crate::models::NewUser;
use crate::services::{user_service, AuthService};

/// The GraphQL schema type
pub type BookSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the injected store and token service
pub fn build_schema(store: Arc<dyn UserStore>, auth: AuthService) -> BookSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(auth)
        .finish()
}

fn into_auth(payload: user_service::AuthPayload) -> Auth {
    Auth {
        token: ID(payload.token),
        user: User(payload.user),
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The current authenticated user
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        user_service::me(ctx.store(), ctx.auth_user())
            .await
            .map(|user| user.map(User))
            .map_err(|e| e.extend())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new user and return a token for it
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<Auth> {
        let new_user = NewUser {
            username,
            email,
            password,
        };
        user_service::add_user(ctx.store(), ctx.auth_service(), new_user)
            .await
            .map(into_auth)
            .map_err(|e| e.extend())
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<Auth> {
        user_service::login(ctx.store(), ctx.auth_service(), &email, &password)
            .await
            .map(into_auth)
            .map_err(|e| e.extend())
    }

    /// Append a book to the current user's saved books
    async fn save_book(&self, ctx: &Context<'_>, new_book: BookInput) -> Result<Option<User>> {
        user_service::save_book(ctx.store(), ctx.auth_user(), new_book.into())
            .await
            .map(|user| user.map(User))
            .map_err(|e| e.extend())
    }

    /// Remove every saved entry with this bookId
    async fn remove_book(&self, ctx: &Context<'_>, book_id: String) -> Result<Option<User>> {
        user_service::remove_book(ctx.store(), ctx.auth_user(), &book_id)
            .await
            .map(|user| user.map(User))
            .map_err(|e| e.extend())
    }
}
