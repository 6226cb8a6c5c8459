//! One-shot notices carried across a redirect in a short-lived cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const FLASH_COOKIE: &str = "flash";
const FLASH_MAX_AGE_SECS: u32 = 60;

/// `Set-Cookie` value that stores a notice for the next page view
pub fn set_cookie(message: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        urlencoding::encode(message),
        FLASH_MAX_AGE_SECS
    )
}

/// `Set-Cookie` value that removes a consumed notice
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", FLASH_COOKIE)
}

/// Read the pending notice from the request cookies, if any
pub fn read(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .and_then(|(_, raw)| urlencoding::decode(raw).ok().map(|m| m.into_owned()))
        .filter(|message| !message.is_empty())
}
