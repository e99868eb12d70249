use axum::http::{HeaderMap, header::COOKIE};
use medica_client::{
    Access, Role,
    guard::{authorize, route_access},
    models::Session,
    services::Services,
};
use tracing::{debug, warn};

use crate::{error::AppError, state::AppState};

/// The caller's `Cookie` header, joined if the client split it.
pub fn caller_cookie(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Dashboard proxy first, then the page's own role list.
pub fn decide<'a>(path: &str, session: Option<&'a Session>, allowed: &[Role]) -> Access<'a> {
    match route_access(path, session) {
        Access::Granted(session) => authorize(Some(session), allowed),
        redirect => redirect,
    }
}

/// Services acting as the caller, once the guard lets them through.
pub async fn guarded(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
    allowed: &[Role],
) -> Result<Services, AppError> {
    let api = state.api.for_cookie(caller_cookie(headers));

    let session = api.get_session().await.unwrap_or_else(|e| {
        warn!("Session lookup failed for {path}: {e:?}");
        None
    });

    match decide(path, session.as_ref(), allowed) {
        Access::Granted(session) => {
            debug!("{} {} granted {path}", session.user.role, session.user.id);

            Ok(Services::new(&api))
        }
        Access::Redirect(to) => {
            debug!("Redirecting {path} to {to}");

            Err(AppError::Redirect(to))
        }
    }
}
