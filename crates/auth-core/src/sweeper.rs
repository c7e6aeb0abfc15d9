//! 过期会话后台清理
//!
//! 正确性不依赖此任务（解析时会惰性过期），只用于回收内存。

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::SessionAuthority;

/// 启动清理任务，`shutdown` 取消后退出
pub fn spawn_sweeper(
    authority: Arc<SessionAuthority>,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(interval_secs = every.as_secs(), "Session sweeper started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = authority.sweep_expired();
                    if removed > 0 {
                        debug!(removed, remaining = authority.len(), "Sweeper pass");
                    }
                }
            }
        }

        info!("Session sweeper stopped");
    })
}
