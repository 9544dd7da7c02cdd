//! Session cookie parsing and `Set-Cookie` formatting.

use axum::http::{HeaderMap, header::COOKIE};

use crate::state::{SESSION_COOKIE, WebSettings};

/// Extracts the session id from the `Cookie` header.
///
/// Handles multiple cookies in one header and ignores unrelated ones.
pub fn read_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(session_id: &str, settings: &WebSettings) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        settings.session_ttl_seconds
    );
    if settings.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_session_cookie(settings: &WebSettings) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if settings.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}
