use crate::api::handlers;
use crate::auth::middleware::{require_basic_auth, require_bearer_auth};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Build the application router.
///
/// Route protection is decided here and nowhere else: registration, login,
/// and the health probe are public; thing reads sit behind the basic gate;
/// review creation sits behind the bearer gate. A rejected request never
/// reaches its handler.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/api/health", get(health))
        .route("/api/users", post(handlers::users::register))
        .route("/api/auth/login", post(handlers::auth::login));

    let basic_routes = Router::new()
        // Reads re-verify the caller's credentials on every request
        .route("/api/things", get(handlers::things::list_things))
        .route("/api/things/{thing_id}", get(handlers::things::get_thing))
        .route(
            "/api/things/{thing_id}/reviews",
            get(handlers::things::list_thing_reviews),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    let bearer_routes = Router::new()
        // Writes require a session token issued at login
        .route(
            "/api/things/{thing_id}/reviews",
            post(handlers::things::create_thing_review),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    public_routes
        .merge(basic_routes)
        .merge(bearer_routes)
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
