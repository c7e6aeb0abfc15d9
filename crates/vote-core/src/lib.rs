//! forum-vote-core - 评分状态核对
//!
//! 每个用户对每个评分对象（帖子/评论）最多一条投票记录。
//! [`reconcile`] 根据当前记录与本次请求的方向，计算出恢复该不变式所需的
//! 有序变更计划；本 crate 不做任何 I/O，计划由调用方通过存储端口执行。

mod direction;
mod plan;

pub use direction::*;
pub use plan::*;

use forum_common::{Target, UserId};
use serde::{Deserialize, Serialize};

/// 投票记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: UserId,
    pub target: Target,
    pub direction: Direction,
}

impl Vote {
    pub fn new(user_id: UserId, target: Target, direction: Direction) -> Self {
        Self {
            user_id,
            target,
            direction,
        }
    }
}
