pub mod client;
pub mod graphql;
pub mod health;

use actix_web::web;

use crate::middleware::AuthContext;
use crate::state::AppState;

/// Registers app data and every route of the service
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.schema.clone()))
        .app_data(web::Data::from(state.store.clone()));

    let endpoint = web::resource("/graphql").route(web::post().to(graphql::graphql_handler));
    let endpoint = if state.config.is_production() {
        endpoint
    } else {
        endpoint.route(web::get().to(graphql::graphiql))
    };

    cfg.service(endpoint.wrap(AuthContext::new(state.auth.clone())))
        .route("/health", web::get().to(health::health_check));

    // Catch-all, must stay last
    if state.config.is_production() {
        cfg.service(client::client_bundle(&state.config.client_dist));
    }
}
