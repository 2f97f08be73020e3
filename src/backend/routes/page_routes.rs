/**
 * Page Route Configuration
 *
 * Page-data routes. Guarding happens inside each page handler (see
 * `middleware::page`), since a denied page redirects instead of failing.
 */

use axum::{routing::get, Router};

use crate::backend::pages::{
    create_post_page, home, practitioner_dashboard, unauthorized, user_dashboard,
};
use crate::backend::server::state::AppState;

pub fn configure_page_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(home))
        .route("/unauthorized", get(unauthorized))
        .route("/dashboard/user", get(user_dashboard))
        .route("/dashboard/practitioner", get(practitioner_dashboard))
        .route("/dashboard/practitioner/create", get(create_post_page))
}
