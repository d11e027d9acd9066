use actix_web::{web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::graphql::BookSchema;
use crate::services::AuthUser;

/// POST /graphql - executes one GraphQL request with the caller identity, if any
pub async fn graphql_handler(
    schema: web::Data<BookSchema>,
    user: Option<web::ReqData<AuthUser>>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();

    if let Some(user) = user {
        request = request.data(user.into_inner());
    }

    schema.execute(request).await.into()
}

/// GET /graphql - GraphiQL playground (development only)
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
