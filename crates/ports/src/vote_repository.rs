//! 投票 Repository trait

use async_trait::async_trait;
use forum_common::{Target, UserId};
use forum_errors::AppResult;
use forum_vote_core::{Direction, Vote};

/// 投票记录存储
///
/// 实现方需保证 `(user_id, target)` 唯一；错误原样返回给调用方，不做重试。
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// 查询用户当前对该对象的评分，无记录返回 `None`
    async fn get_vote_type(&self, user_id: UserId, target: Target) -> AppResult<Option<Direction>>;

    /// 插入投票记录
    async fn add_vote(&self, vote: &Vote) -> AppResult<()>;

    /// 删除 `(user_id, target)` 对应的记录，`direction` 不参与匹配
    async fn delete_vote(&self, vote: &Vote) -> AppResult<()>;
}
