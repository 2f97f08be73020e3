/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration (public)
 * - `POST /api/auth/login` - User login (public)
 * - `POST /api/auth/logout` - Clear session cookie (public)
 * - `GET /api/auth/me` - Current user info (any role)
 *
 * ## Blog
 * - `POST /api/blog/create` - Create a post (practitioner)
 *
 * Every route answers other methods with a 405 JSON body. Guarded routes sit
 * behind `require_roles`, so the guard runs before the method is checked.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{get_me, login, logout, method_not_allowed, register};
use crate::backend::blog::create_post;
use crate::backend::middleware::api::{require_roles, RoleGuard};
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Configure API routes
///
/// `state` is needed up front to build the guard layers.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route(
            "/api/auth/register",
            post(register).fallback(method_not_allowed),
        )
        .route("/api/auth/login", post(login).fallback(method_not_allowed))
        .route("/api/auth/logout", post(logout).fallback(method_not_allowed));

    let authenticated = Router::new()
        .route("/api/auth/me", get(get_me).fallback(method_not_allowed))
        .route_layer(from_fn_with_state(
            RoleGuard::any(state.tokens.clone()),
            require_roles,
        ));

    let practitioner = Router::new()
        .route("/api/blog/create", post(create_post).fallback(method_not_allowed))
        .route_layer(from_fn_with_state(
            RoleGuard::new(state.tokens.clone(), &[Role::Practitioner]),
            require_roles,
        ));

    router.merge(public).merge(authenticated).merge(practitioner)
}
