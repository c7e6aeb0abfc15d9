//! 会话管理器

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use forum_common::{Clock, SystemClock, UserId};
use metrics::{counter, gauge};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::{Session, SessionToken};

/// 默认会话有效期
pub const DEFAULT_SESSION_TTL_SECS: i64 = 120;

#[derive(Default)]
struct SessionTable {
    by_token: HashMap<SessionToken, Session>,
    /// 反向索引，保证每个用户最多一个会话
    by_user: HashMap<UserId, SessionToken>,
}

impl SessionTable {
    fn remove(&mut self, token: &SessionToken) -> Option<Session> {
        let session = self.by_token.remove(token)?;
        if self.by_user.get(&session.user_id) == Some(token) {
            self.by_user.remove(&session.user_id);
        }
        Some(session)
    }
}

/// 会话管理器
///
/// 会话表只在本结构内修改。所有操作在同一把读写锁下完成，对同一用户的
/// 创建、解析、注销彼此线性一致：并发登录时后写入者生效，先前的令牌立即失效。
pub struct SessionAuthority {
    table: RwLock<SessionTable>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionAuthority {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(SessionTable::default()),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 为用户创建新会话
    ///
    /// 该用户已有的会话先被移除，再写入新记录。
    pub fn create_session(&self, user_id: UserId) -> Session {
        let now = self.clock.now();
        let mut table = self.table.write();

        if let Some(previous) = table.by_user.get(&user_id).cloned() {
            table.remove(&previous);
            counter!("sessions_superseded_total").increment(1);
            debug!(user_id = %user_id, previous = ?previous, "Previous session superseded");
        }

        let mut token = SessionToken::generate();
        while table.by_token.contains_key(&token) {
            token = SessionToken::generate();
        }

        let session = Session {
            token: token.clone(),
            user_id,
            created_at: now,
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        table.by_user.insert(user_id, token.clone());
        table.by_token.insert(token, session.clone());

        counter!("sessions_created_total").increment(1);
        gauge!("sessions_active").set(table.by_token.len() as f64);
        info!(user_id = %user_id, expires_at = %session.expires_at, "Session created");

        session
    }

    /// 解析令牌对应的用户
    ///
    /// 未知或已过期的令牌返回 `None`（匿名），过期记录顺带删除。不续期。
    pub fn resolve(&self, token: &SessionToken) -> Option<UserId> {
        let now = self.clock.now();
        {
            let table = self.table.read();
            let session = table.by_token.get(token)?;
            if !session.is_expired_at(now) {
                return Some(session.user_id);
            }
        }

        let mut table = self.table.write();
        // 释放读锁后记录可能已被替换或删除，重新检查
        let expired = table
            .by_token
            .get(token)
            .is_some_and(|session| session.is_expired_at(now));
        if expired {
            if let Some(session) = table.remove(token) {
                counter!("sessions_expired_total").increment(1);
                gauge!("sessions_active").set(table.by_token.len() as f64);
                debug!(user_id = %session.user_id, "Expired session removed on access");
            }
        }
        None
    }

    /// 注销会话，令牌不存在时什么也不做
    pub fn invalidate(&self, token: &SessionToken) -> bool {
        let mut table = self.table.write();
        match table.remove(token) {
            Some(session) => {
                counter!("sessions_invalidated_total").increment(1);
                gauge!("sessions_active").set(table.by_token.len() as f64);
                info!(user_id = %session.user_id, "Session invalidated");
                true
            }
            None => false,
        }
    }

    /// 清理所有已过期的会话，返回清理数量
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut table = self.table.write();

        let expired: Vec<SessionToken> = table
            .by_token
            .values()
            .filter(|session| session.is_expired_at(now))
            .map(|session| session.token.clone())
            .collect();
        for token in &expired {
            table.remove(token);
        }

        if !expired.is_empty() {
            counter!("sessions_expired_total").increment(expired.len() as u64);
            gauge!("sessions_active").set(table.by_token.len() as f64);
            debug!(count = expired.len(), "Swept expired sessions");
        }
        expired.len()
    }

    /// 物理存在的会话数（含尚未清理的过期会话）
    pub fn len(&self) -> usize {
        self.table.read().by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionAuthority {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }
}
