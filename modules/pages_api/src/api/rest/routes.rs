use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Assemble the REST router. The service rides in a request extension so
/// both the handlers and the bearer-token extractor can reach it.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/", get(handlers::status))
        .route("/auth/register", post(handlers::register))
        .route("/auth/token", post(handlers::login))
        .route(
            "/pages/",
            post(handlers::create_page).get(handlers::list_pages),
        )
        .route(
            "/pages/{uid}",
            get(handlers::get_page)
                .patch(handlers::update_page)
                .delete(handlers::delete_page),
        )
        .layer(Extension(service))
}
