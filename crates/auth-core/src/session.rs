//! 会话实体

use std::fmt;

use chrono::{DateTime, Utc};
use forum_common::{UserId, utils::random_token};

/// 会话令牌
///
/// 不透明的随机字符串，通常放在 cookie 中回传。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(random_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// 日志中只保留前缀
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "SessionToken({prefix}…)")
    }
}

/// 会话记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// `now` 严格晚于过期时间才算过期
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = Session {
            token: SessionToken::generate(),
            user_id: UserId(1),
            created_at: now,
            expires_at: now + Duration::seconds(120),
        };

        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(session.expires_at));
        assert!(session.is_expired_at(session.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = SessionToken::from("0123456789abcdef");
        let debug = format!("{token:?}");

        assert!(debug.starts_with("SessionToken(012345"));
        assert!(!debug.contains("6789abcdef"));
        assert_eq!(token.to_string(), "0123456789abcdef");
    }
}
