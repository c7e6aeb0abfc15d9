//! forum-web - 论坛会话与评分服务
//!
//! 会话解析、登录/注销与评分接口；存储通过 `forum-ports` 中的端口注入。

pub mod api;
pub mod application;
pub mod infrastructure;
pub mod state;

pub use state::AppState;
