//! 变更计划

use serde::{Deserialize, Serialize};

use crate::{Direction, VoteState};

/// 单步变更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// 删除当前记录
    Delete,
    /// 插入指定方向的记录
    Insert(Direction),
}

/// 核对结果
///
/// 方向切换建模为先删后插，从不原地更新。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    /// 尚无记录：插入
    Insert(Direction),
    /// 重复同一方向：撤销
    ToggleOff,
    /// 反方向：删除后插入
    Switch(Direction),
}

impl Plan {
    /// 按执行顺序展开的步骤
    pub fn steps(&self) -> Vec<Mutation> {
        match *self {
            Self::Insert(direction) => vec![Mutation::Insert(direction)],
            Self::ToggleOff => vec![Mutation::Delete],
            Self::Switch(direction) => vec![Mutation::Delete, Mutation::Insert(direction)],
        }
    }

    /// 计划完整执行后的状态
    pub fn resulting_state(&self) -> VoteState {
        match *self {
            Self::Insert(direction) | Self::Switch(direction) => {
                VoteState::from_stored(Some(direction))
            }
            Self::ToggleOff => VoteState::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::ToggleOff => "toggle_off",
            Self::Switch(_) => "switch",
        }
    }
}

/// 根据已存记录和请求方向计算变更计划
pub fn reconcile(existing: Option<Direction>, requested: Direction) -> Plan {
    match (existing, requested) {
        (None, requested) => Plan::Insert(requested),
        (Some(Direction::Like), Direction::Like) => Plan::ToggleOff,
        (Some(Direction::Like), Direction::Dislike) => Plan::Switch(Direction::Dislike),
        (Some(Direction::Dislike), Direction::Dislike) => Plan::ToggleOff,
        (Some(Direction::Dislike), Direction::Like) => Plan::Switch(Direction::Like),
    }
}
