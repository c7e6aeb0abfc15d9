//! 评分方向与状态

use std::str::FromStr;

use derive_more::Display;
use forum_errors::AppError;
use serde::{Deserialize, Serialize};

/// 评分方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[display("like")]
    Like,
    #[display("dislike")]
    Dislike,
}

impl Direction {
    /// 存储层使用的数值：like = 1，dislike = -1
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            other => Err(AppError::validation(format!(
                "vote_type must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl FromStr for Direction {
    type Err = AppError;

    /// 接受表单里的 `1` / `-1`，也接受 `like` / `dislike`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            raw => raw
                .parse::<i64>()
                .map_err(|_| AppError::validation(format!("invalid vote_type: {raw:?}")))
                .and_then(Self::try_from),
        }
    }
}

/// 单个用户对单个对象的评分状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum VoteState {
    Neutral,
    Liked,
    Disliked,
}

impl VoteState {
    /// 当前存储的记录，缺失即为 `Neutral`
    pub fn from_stored(existing: Option<Direction>) -> Self {
        match existing {
            None => Self::Neutral,
            Some(Direction::Like) => Self::Liked,
            Some(Direction::Dislike) => Self::Disliked,
        }
    }

    pub fn stored(self) -> Option<Direction> {
        match self {
            Self::Neutral => None,
            Self::Liked => Some(Direction::Like),
            Self::Disliked => Some(Direction::Dislike),
        }
    }

    /// 状态转移；重复同一方向回到 `Neutral`
    pub fn transition(self, requested: Direction) -> Self {
        match (self, requested) {
            (Self::Neutral, Direction::Like) => Self::Liked,
            (Self::Neutral, Direction::Dislike) => Self::Disliked,
            (Self::Liked, Direction::Like) => Self::Neutral,
            (Self::Liked, Direction::Dislike) => Self::Disliked,
            (Self::Disliked, Direction::Dislike) => Self::Neutral,
            (Self::Disliked, Direction::Like) => Self::Liked,
        }
    }
}
