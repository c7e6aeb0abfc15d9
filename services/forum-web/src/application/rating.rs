//! 评分处理器

use std::sync::Arc;

use forum_common::{CommentId, PostId, Target, UserId};
use forum_errors::{AppError, AppResult};
use forum_ports::{UserRepository, VoteRepository};
use forum_vote_core::{Direction, Mutation, Plan, Vote, VoteState, reconcile};
use metrics::counter;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::VoteLocks;

/// 评分表单原始字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub comment_id: String,
    #[serde(default)]
    pub vote_type: String,
}

/// 评分命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCommand {
    pub user_id: UserId,
    pub post_id: PostId,
    pub target: Target,
    pub direction: Direction,
}

impl RateCommand {
    /// 校验表单：`post_id` ≥ 1，`comment_id` 为 0 表示给帖子本身评分，
    /// `vote_type` 只能是 1 或 -1
    pub fn from_form(user_id: UserId, form: &RateForm) -> AppResult<Self> {
        let post_id = form
            .post_id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
            .map(PostId)
            .ok_or_else(|| AppError::validation("post_id must be a positive integer"))?;

        let comment_id = form
            .comment_id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 0)
            .ok_or_else(|| AppError::validation("comment_id must be a non-negative integer"))?;
        let target = if comment_id == 0 {
            Target::Post(post_id)
        } else {
            Target::Comment(CommentId(comment_id))
        };

        let direction = form.vote_type.parse::<Direction>()?;

        Ok(Self {
            user_id,
            post_id,
            target,
            direction,
        })
    }
}

/// 评分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateOutcome {
    pub plan: Plan,
    pub state: VoteState,
}

/// 按顺序执行变更计划
///
/// 任一步失败立即返回原始错误。切换时删除成功而插入失败，记录停留在
/// `Neutral`：宁可少计一票，也不会出现错误方向或重复计票。
pub async fn apply_plan(
    votes: &dyn VoteRepository,
    user_id: UserId,
    target: Target,
    existing: Option<Direction>,
    plan: Plan,
) -> AppResult<VoteState> {
    let mut state = VoteState::from_stored(existing);

    for step in plan.steps() {
        match step {
            Mutation::Delete => {
                let stored = existing
                    .ok_or_else(|| AppError::internal("delete step without a stored vote"))?;
                votes
                    .delete_vote(&Vote::new(user_id, target, stored))
                    .await?;
                state = VoteState::Neutral;
            }
            Mutation::Insert(direction) => {
                if let Err(e) = votes.add_vote(&Vote::new(user_id, target, direction)).await {
                    if state == VoteState::Neutral && existing.is_some() {
                        warn!(
                            user_id = %user_id,
                            target = %target,
                            error = %e,
                            "Vote switch failed after delete, vote left neutral"
                        );
                    }
                    return Err(e);
                }
                state = VoteState::from_stored(Some(direction));
            }
        }
    }

    Ok(state)
}

/// 评分处理器
pub struct RateHandler {
    users: Arc<dyn UserRepository>,
    votes: Arc<dyn VoteRepository>,
    locks: VoteLocks,
}

impl RateHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        votes: Arc<dyn VoteRepository>,
        locks: VoteLocks,
    ) -> Self {
        Self {
            users,
            votes,
            locks,
        }
    }

    pub async fn handle(&self, command: RateCommand) -> AppResult<RateOutcome> {
        let RateCommand {
            user_id,
            target,
            direction,
            ..
        } = command;

        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated("session user no longer exists"))?;

        let _guard = self.locks.lock(user_id, target).await;

        let existing = self.votes.get_vote_type(user_id, target).await?;
        let plan = reconcile(existing, direction);
        debug!(
            user_id = %user_id,
            target = %target,
            existing = ?existing,
            requested = %direction,
            plan = plan.label(),
            "Vote reconciled"
        );

        let result = apply_plan(self.votes.as_ref(), user_id, target, existing, plan).await;
        let outcome = if result.is_ok() { plan.label() } else { "failed" };
        counter!("votes_applied_total", "outcome" => outcome).increment(1);

        Ok(RateOutcome {
            plan,
            state: result?,
        })
    }
}
