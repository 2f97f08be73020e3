/**
 * Page Guard
 *
 * Wraps the server-side data loading of a page. Pages never answer with an
 * error body: a denied request is redirected instead.
 *
 * - Unauthenticated → temporary redirect to `/` (sign-in entry point)
 * - Forbidden → temporary redirect to `/unauthorized`
 * - Allowed → the loader's outcome, unchanged; empty props without a loader
 */

use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};
use std::future::{Future, Ready};

use crate::backend::auth::sessions::SessionTokens;
use crate::backend::middleware::guard::{authorize, AuthDecision, DenyReason, Principal};
use crate::shared::Role;

/// Where unauthenticated page requests are sent
pub const SIGN_IN_PATH: &str = "/";

/// Where page requests with the wrong role are sent
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Result of a page request: props for the renderer, or a redirect
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Props(Value),
    Redirect { destination: String, permanent: bool },
}

impl PageOutcome {
    /// Empty props object
    pub fn empty() -> Self {
        Self::Props(json!({}))
    }

    pub fn redirect(destination: impl Into<String>) -> Self {
        Self::Redirect {
            destination: destination.into(),
            permanent: false,
        }
    }
}

impl IntoResponse for PageOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Props(props) => Json(json!({ "props": props })).into_response(),
            Self::Redirect {
                destination,
                permanent: true,
            } => Redirect::permanent(&destination).into_response(),
            Self::Redirect { destination, .. } => Redirect::temporary(&destination).into_response(),
        }
    }
}

/// What a page loader gets to work with
#[derive(Debug, Clone)]
pub struct PageContext {
    pub principal: Principal,
}

/// Loader type for pages that have none
pub type NoLoader = fn(PageContext) -> Ready<PageOutcome>;

/// Guard a page and run its loader
pub async fn guard_page<F, Fut>(
    tokens: &SessionTokens,
    token: Option<&str>,
    required: &[Role],
    loader: Option<F>,
) -> PageOutcome
where
    F: FnOnce(PageContext) -> Fut,
    Fut: Future<Output = PageOutcome>,
{
    match authorize(tokens, token, required) {
        AuthDecision::Deny(DenyReason::Unauthenticated) => PageOutcome::redirect(SIGN_IN_PATH),
        AuthDecision::Deny(DenyReason::Forbidden) => PageOutcome::redirect(UNAUTHORIZED_PATH),
        AuthDecision::Allow(principal) => match loader {
            Some(load) => load(PageContext { principal }).await,
            None => PageOutcome::empty(),
        },
    }
}

/// Guard a page that has no loader
pub async fn guard_page_props(
    tokens: &SessionTokens,
    token: Option<&str>,
    required: &[Role],
) -> PageOutcome {
    guard_page(tokens, token, required, None::<NoLoader>).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::clock::SystemClock;
    use axum::http::{header::LOCATION, StatusCode};
    use std::sync::Arc;
    use uuid::Uuid;

    fn tokens() -> SessionTokens {
        SessionTokens::new(b"page-secret", chrono::Duration::days(30), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn test_unauthenticated_redirects_to_sign_in() {
        let outcome = guard_page_props(&tokens(), None, &[Role::User]).await;
        assert_eq!(outcome, PageOutcome::redirect("/"));
    }

    #[tokio::test]
    async fn test_forbidden_redirects_to_unauthorized() {
        let tokens = tokens();
        let token = tokens.mint(Uuid::new_v4(), Role::User).unwrap();
        let outcome = guard_page_props(&tokens, Some(&token), &[Role::Practitioner]).await;
        assert_eq!(outcome, PageOutcome::redirect("/unauthorized"));
    }

    #[tokio::test]
    async fn test_no_loader_gives_empty_props() {
        let tokens = tokens();
        let token = tokens.mint(Uuid::new_v4(), Role::Practitioner).unwrap();
        let outcome = guard_page_props(&tokens, Some(&token), &[Role::Practitioner]).await;
        assert_eq!(outcome, PageOutcome::Props(json!({})));
    }

    #[tokio::test]
    async fn test_loader_outcome_passes_through() {
        let tokens = tokens();
        let subject = Uuid::new_v4();
        let token = tokens.mint(subject, Role::User).unwrap();

        let outcome = guard_page(
            &tokens,
            Some(&token),
            &[Role::User],
            Some(|ctx: PageContext| async move {
                PageOutcome::Props(json!({ "subject": ctx.principal.subject_id }))
            }),
        )
        .await;
        assert_eq!(outcome, PageOutcome::Props(json!({ "subject": subject })));

        // A loader may itself redirect.
        let outcome = guard_page(
            &tokens,
            Some(&token),
            &[Role::User],
            Some(|_ctx: PageContext| async {
                PageOutcome::Redirect {
                    destination: "/moved".to_string(),
                    permanent: true,
                }
            }),
        )
        .await;
        assert_eq!(
            outcome,
            PageOutcome::Redirect {
                destination: "/moved".to_string(),
                permanent: true
            }
        );
    }

    #[tokio::test]
    async fn test_loader_not_run_when_denied() {
        let ran = std::sync::atomic::AtomicBool::new(false);
        let outcome = guard_page(&tokens(), None, &[], Some(|_ctx: PageContext| async {
            ran.store(true, std::sync::atomic::Ordering::SeqCst);
            PageOutcome::empty()
        }))
        .await;

        assert_eq!(outcome, PageOutcome::redirect("/"));
        assert!(!ran.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_outcome_responses() {
        let response = PageOutcome::redirect("/").into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");

        let response = PageOutcome::Redirect {
            destination: "/new".to_string(),
            permanent: true,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);

        assert_eq!(PageOutcome::empty().into_response().status(), StatusCode::OK);
    }
}
