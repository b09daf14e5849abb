use axum::{handler::Handler, middleware::from_fn, routing::get, Router};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route(
            "/companies",
            get(handlers::companies::list)
                .post(handlers::companies::create.layer(from_fn(authn::require_admin))),
        )
        .route(
            "/companies/:handle",
            get(handlers::companies::retrieve)
                .patch(handlers::companies::update.layer(from_fn(authn::require_admin)))
                .delete(handlers::companies::remove.layer(from_fn(authn::require_admin))),
        )
        .route(
            "/jobs",
            get(handlers::jobs::list)
                .post(handlers::jobs::create.layer(from_fn(authn::require_admin))),
        )
        .route(
            "/jobs/:id",
            get(handlers::jobs::retrieve)
                .patch(handlers::jobs::update.layer(from_fn(authn::require_admin)))
                .delete(handlers::jobs::remove.layer(from_fn(authn::require_admin))),
        )
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
