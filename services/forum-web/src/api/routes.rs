//! 路由处理函数

use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use forum_common::User;
use forum_errors::AppError;
use serde::Serialize;

use crate::AppState;
use crate::api::cookies::{clear_cookie, read_session_token, session_cookie};
use crate::api::error::ApiResult;
use crate::application::{RateCommand, RateForm, SignInCommand, sign_out};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// POST /signin
pub async fn sign_in(
    State(state): State<AppState>,
    Form(command): Form<SignInCommand>,
) -> ApiResult<Response> {
    let session = state.sign_in.handle(command).await?;
    let cookie = session_cookie(&state.cookie_name, &session)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&format!("/user?id={}", session.user_id)),
    )
        .into_response())
}

/// GET /signout
pub async fn sign_out_route(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let token = read_session_token(&headers, &state.cookie_name);
    if sign_out(&state.sessions, token.as_ref()) {
        let cookie = clear_cookie(&state.cookie_name)?;
        return Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response());
    }
    Ok(Redirect::to("/").into_response())
}

/// GET /me
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<User>> {
    let token = read_session_token(&headers, &state.cookie_name);
    let user = state
        .current_user
        .load(token.as_ref())
        .await?
        .ok_or_else(|| AppError::unauthenticated("sign in required"))?;
    Ok(Json(user))
}

/// POST /rate
///
/// 匿名请求跳转到登录页；参数错误返回 400，不会进入核对逻辑。
pub async fn rate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RateForm>,
) -> ApiResult<Response> {
    let token = read_session_token(&headers, &state.cookie_name);
    let Some(user_id) = state.current_user.identify(token.as_ref()) else {
        return Ok(Redirect::to("/signin").into_response());
    };

    let command = RateCommand::from_form(user_id, &form)?;
    state.rate.handle(command).await?;

    Ok(Redirect::to(&format!("/post?id={}", command.post_id)).into_response())
}
