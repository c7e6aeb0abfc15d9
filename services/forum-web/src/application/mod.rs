//! 应用层

mod auth;
mod locks;
mod rating;

pub use auth::*;
pub use locks::*;
pub use rating::*;
