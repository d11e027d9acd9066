use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use serde::Deserialize;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::services::auth_service::{extract_token, AuthService};

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Resolves the bearer token of every request into an `AuthUser` request
/// extension. Requests without a valid token pass through untouched; the
/// resolvers decide what needs authentication.
pub struct AuthContext {
    auth: Rc<AuthService>,
}

impl AuthContext {
    pub fn new(auth: AuthService) -> Self {
        Self { auth: Rc::new(auth) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthContext
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthContextService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthContextService {
            service,
            auth: self.auth.clone(),
        }))
    }
}

pub struct AuthContextService<S> {
    service: S,
    auth: Rc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for AuthContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        // A malformed query string just means no query token
        let query = web::Query::<TokenQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().token);

        if let Some(user) = self.auth.authenticate(extract_token(query.as_deref(), header)) {
            log::debug!("🔑 Authenticated request for user {}", user.id);
            req.extensions_mut().insert(user);
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::models::User;
    use crate::services::AuthUser;
    use actix_web::{test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;

    fn auth() -> AuthService {
        AuthService::new(&JwtConfig {
            secret: "secret".to_string(),
            expiration_hours: 2,
        })
    }

    async fn whoami(user: Option<web::ReqData<AuthUser>>) -> HttpResponse {
        match user {
            Some(user) => HttpResponse::Ok().body(user.username.clone()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_identity_attached_or_absent() {
        let auth = auth();
        let token = auth
            .sign_token(&User {
                id: ObjectId::new(),
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password: String::new(),
                saved_books: vec![],
            })
            .unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthContext::new(auth))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "alice");

        let req = test::TestRequest::get()
            .uri(&format!("/whoami?token={}", token))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "alice");

        // Query values are percent-decoded before verification
        let encoded = token.replace('.', "%2E");
        let req = test::TestRequest::get()
            .uri(&format!("/whoami?page=1&token={}", encoded))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "alice");

        // Invalid and missing tokens still reach the handler
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(test::read_body(resp).await, "anonymous");

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }
}
