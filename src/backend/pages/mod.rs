//! Page Routes
//!
//! Server-side page data. Each page answers with its props as JSON, or with a
//! redirect when the page guard denies the request. Rendering is left to the
//! frontend.
//!
//! | Path                              | Access       | Loader |
//! |-----------------------------------|--------------|--------|
//! | `/`                               | public       | static |
//! | `/unauthorized`                   | public       | static |
//! | `/dashboard/user`                 | user         | yes    |
//! | `/dashboard/practitioner`         | practitioner | yes    |
//! | `/dashboard/practitioner/create`  | practitioner | none   |

use axum::extract::State;
use serde::Serialize;
use serde_json::json;

use crate::backend::middleware::auth::SessionToken;
use crate::backend::middleware::page::{guard_page, guard_page_props, PageContext, PageOutcome};
use crate::backend::server::AppState;
use crate::shared::Role;

/// A navigation entry on a dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardLink {
    pub href: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const USER_LINKS: [DashboardLink; 2] = [
    DashboardLink {
        href: "/blog",
        title: "Blog",
        description: "Read wellness and Ayurvedic articles",
    },
    DashboardLink {
        href: "/ai-chat",
        title: "AI Wellness Assistant",
        description: "Get personalized wellness advice",
    },
];

const PRACTITIONER_LINKS: [DashboardLink; 3] = [
    DashboardLink {
        href: "/blog",
        title: "View Blog Posts",
        description: "Browse all published blog articles",
    },
    DashboardLink {
        href: "/dashboard/practitioner/create",
        title: "Create Blog Post",
        description: "Write and publish new blog articles",
    },
    DashboardLink {
        href: "/ai-chat",
        title: "AI Wellness Assistant",
        description: "Interact with AI for wellness insights",
    },
];

/// Sign-in entry point
pub async fn home() -> PageOutcome {
    PageOutcome::Props(json!({
        "title": "Tangerine Wellness Platform",
        "login": "/api/auth/login",
        "register": "/api/auth/register",
        "portals": [
            {
                "href": "/dashboard/practitioner",
                "title": "Practitioner Portal",
                "description": "Access blog management, AI tools, and professional resources",
            },
            {
                "href": "/dashboard/user",
                "title": "User Portal",
                "description": "Read blogs, get wellness advice, and explore Ayurvedic insights",
            },
        ],
    }))
}

pub async fn unauthorized() -> PageOutcome {
    PageOutcome::Props(json!({
        "title": "Unauthorized Access",
        "message": "You do not have permission to view this page.",
        "home": "/",
    }))
}

fn dashboard(title: &str, links: &[DashboardLink], ctx: &PageContext) -> PageOutcome {
    PageOutcome::Props(json!({
        "title": title,
        "user": {
            "id": ctx.principal.subject_id,
            "name": ctx.principal.name,
            "role": ctx.principal.role,
        },
        "links": links,
    }))
}

pub async fn user_dashboard(State(state): State<AppState>, token: SessionToken) -> PageOutcome {
    guard_page(
        &state.tokens,
        token.as_deref(),
        &[Role::User],
        Some(|ctx: PageContext| async move { dashboard("User Dashboard", &USER_LINKS, &ctx) }),
    )
    .await
}

pub async fn practitioner_dashboard(
    State(state): State<AppState>,
    token: SessionToken,
) -> PageOutcome {
    guard_page(
        &state.tokens,
        token.as_deref(),
        &[Role::Practitioner],
        Some(|ctx: PageContext| async move {
            dashboard("Practitioner Dashboard", &PRACTITIONER_LINKS, &ctx)
        }),
    )
    .await
}

/// The editor page has no server-side data
pub async fn create_post_page(
    State(state): State<AppState>,
    token: SessionToken,
) -> PageOutcome {
    guard_page_props(&state.tokens, token.as_deref(), &[Role::Practitioner]).await
}
