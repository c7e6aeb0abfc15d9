//! 用户 Repository trait

use async_trait::async_trait;
use forum_common::{User, UserId};
use forum_errors::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据 ID 查找用户
    async fn get_user_by_id(&self, id: UserId) -> AppResult<Option<User>>;
}
