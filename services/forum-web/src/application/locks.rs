//! 按 (用户, 评分对象) 粒度的异步锁
//!
//! 查询 → 核对 → 执行 必须串行，否则两个并发请求都读到"无记录"后各插入一条。

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use forum_common::{Target, UserId};
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

const PRUNE_THRESHOLD: usize = 256;

type Key = (UserId, Target);

/// 评分临界区
#[derive(Default, Clone)]
pub struct VoteLocks {
    slots: Arc<Mutex<HashMap<Key, Weak<AsyncMutex<()>>>>>,
}

impl VoteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取 `(user_id, target)` 的锁，守卫释放前其他同键请求等待
    pub async fn lock(&self, user_id: UserId, target: Target) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock();
            if slots.len() >= PRUNE_THRESHOLD {
                slots.retain(|_, slot| slot.strong_count() > 0);
            }
            let key = (user_id, target);
            match slots.get(&key).and_then(Weak::upgrade) {
                Some(slot) => slot,
                None => {
                    let slot = Arc::new(AsyncMutex::new(()));
                    slots.insert(key, Arc::downgrade(&slot));
                    slot
                }
            }
        };
        slot.lock_owned().await
    }

    /// 仍有持有者或等待者的锁数量
    pub fn active(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }
}
