//! 会话 cookie 读写

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};
use forum_auth_core::{Session, SessionToken};
use forum_errors::{AppError, AppResult};

/// 从 `Cookie` 头中取出会话令牌
pub fn read_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| SessionToken::from(value))
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// 签发会话 cookie，过期时间与会话一致
pub fn session_cookie(cookie_name: &str, session: &Session) -> AppResult<HeaderValue> {
    let max_age = (session.expires_at - session.created_at).num_seconds().max(0);
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}; Expires={}",
        cookie_name,
        session.token,
        max_age,
        http_date(session.expires_at),
    );
    to_header(&cookie)
}

/// 清除会话 cookie
pub fn clear_cookie(cookie_name: &str) -> AppResult<HeaderValue> {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        cookie_name
    );
    to_header(&cookie)
}

fn to_header(cookie: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(cookie)
        .map_err(|e| AppError::internal(format!("Invalid cookie header: {}", e)))
}
