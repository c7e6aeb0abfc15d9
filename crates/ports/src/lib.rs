//! forum-ports - 抽象 trait 层
//!
//! 定义会话与评分逻辑所依赖的外部协作方接口（存储、凭证校验）

mod credentials;
mod user_repository;
mod vote_repository;

pub use credentials::*;
pub use user_repository::*;
pub use vote_repository::*;
