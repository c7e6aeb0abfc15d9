//! forum-auth-core - 会话管理核心库
//!
//! 进程内会话表：每个用户同一时刻最多一个有效会话，过期时间从创建时起算。

mod authority;
mod session;
mod sweeper;

pub use authority::*;
pub use session::*;
pub use sweeper::*;
