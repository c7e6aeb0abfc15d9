//! 基础设施层

mod memory_store;

pub use memory_store::*;
