//! Request-scoped data available to resolvers.
//!
//! The HTTP handler adds an `AuthUser` to the request data when the auth
//! middleware verified a bearer token. Resolvers never reject on their own
//! from here; `services::user_service` owns the authentication checks.

use std::sync::Arc;

use async_graphql::Context;

use crate::database::UserStore;
use crate::services::{AuthService, AuthUser};

/// Accessors for the injected store, token service and identity
pub trait ContextExt {
    /// The authenticated user, if the request carried a valid token
    fn auth_user(&self) -> Option<&AuthUser>;

    fn store(&self) -> &dyn UserStore;

    fn auth_service(&self) -> &AuthService;
}

impl<'a> ContextExt for Context<'a> {
    fn auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }

    fn store(&self) -> &dyn UserStore {
        self.data_unchecked::<Arc<dyn UserStore>>().as_ref()
    }

    fn auth_service(&self) -> &AuthService {
        self.data_unchecked::<AuthService>()
    }
}
