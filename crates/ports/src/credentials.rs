//! 凭证校验 trait

use async_trait::async_trait;
use forum_common::UserId;
use forum_errors::AppResult;

/// 凭证校验（密码哈希比对由实现方负责）
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// 凭证正确时返回用户 ID，否则返回 `None`
    async fn verify(&self, login: &str, password: &str) -> AppResult<Option<UserId>>;
}
