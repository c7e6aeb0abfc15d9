//! 登录 / 注销 / 当前用户

use std::sync::Arc;

use forum_auth_core::{Session, SessionAuthority, SessionToken};
use forum_common::{User, UserId};
use forum_errors::{AppError, AppResult};
use forum_ports::{CredentialVerifier, UserRepository};
use serde::Deserialize;
use tracing::{debug, info};

/// 登录命令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInCommand {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 登录处理器
pub struct SignInHandler {
    sessions: Arc<SessionAuthority>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl SignInHandler {
    pub fn new(sessions: Arc<SessionAuthority>, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            sessions,
            credentials,
        }
    }

    /// 校验凭证并签发会话；该用户此前的会话随之失效
    pub async fn handle(&self, command: SignInCommand) -> AppResult<Session> {
        let login = command.email.trim();
        let password = command.password.trim();
        if login.is_empty() || password.is_empty() {
            return Err(AppError::validation("email and password are required"));
        }

        let user_id = self
            .credentials
            .verify(login, password)
            .await?
            .ok_or_else(|| AppError::unauthorized("incorrect email or password"))?;

        let session = self.sessions.create_session(user_id);
        info!(user_id = %user_id, "User signed in");
        Ok(session)
    }
}

/// 注销：令牌有效时删除会话，返回是否真正注销了会话
pub fn sign_out(sessions: &SessionAuthority, token: Option<&SessionToken>) -> bool {
    let Some(token) = token else {
        return false;
    };
    match sessions.resolve(token) {
        Some(user_id) => {
            sessions.invalidate(token);
            info!(user_id = %user_id, "User signed out");
            true
        }
        None => false,
    }
}

/// 会话解析后的调用方身份
pub struct CurrentUser {
    sessions: Arc<SessionAuthority>,
    users: Arc<dyn UserRepository>,
}

impl CurrentUser {
    pub fn new(sessions: Arc<SessionAuthority>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    /// 匿名返回 `None`，不是错误
    pub fn identify(&self, token: Option<&SessionToken>) -> Option<UserId> {
        token.and_then(|token| self.sessions.resolve(token))
    }

    /// 已登录时加载用户资料
    pub async fn load(&self, token: Option<&SessionToken>) -> AppResult<Option<User>> {
        let Some(user_id) = self.identify(token) else {
            debug!("Anonymous request");
            return Ok(None);
        };
        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {user_id}")))?;
        Ok(Some(user))
    }
}
