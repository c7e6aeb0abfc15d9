//! 内存存储适配器
//!
//! 实现存储与凭证端口，`(user_id, target)` 上的唯一约束与 SQL 表一致：
//! 重复插入返回 `Conflict`。用于本地演示和测试。

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use forum_common::{Target, User, UserId};
use forum_errors::{AppError, AppResult};
use forum_ports::{CredentialVerifier, UserRepository, VoteRepository};
use forum_vote_core::{Direction, Vote};
use parking_lot::RwLock;

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, StoredUser>,
    /// `vote_type` 列：1 或 -1
    votes: HashMap<(UserId, Target), i64>,
    next_user_id: i64,
}

#[derive(Default)]
pub struct MemoryForumStore {
    tables: RwLock<Tables>,
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册用户，邮箱或昵称重复返回 `Conflict`
    pub fn add_user(&self, email: &str, nickname: &str, password: &str) -> AppResult<UserId> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        let mut tables = self.tables.write();
        for stored in tables.users.values() {
            if stored.user.email == email {
                return Err(AppError::conflict("this email is already in use"));
            }
            if stored.user.nickname == nickname {
                return Err(AppError::conflict("this username is already in use"));
            }
        }

        tables.next_user_id += 1;
        let id = UserId(tables.next_user_id);
        tables.users.insert(
            id,
            StoredUser {
                user: User {
                    id,
                    email: email.to_string(),
                    nickname: nickname.to_string(),
                },
                password_hash,
            },
        );
        Ok(id)
    }

    /// 某个对象的 (赞, 踩) 计数
    pub fn tally(&self, target: Target) -> (usize, usize) {
        let tables = self.tables.read();
        tables
            .votes
            .iter()
            .filter(|((_, t), _)| *t == target)
            .fold((0, 0), |(likes, dislikes), (_, vote_type)| {
                if *vote_type == Direction::Like.as_i64() {
                    (likes + 1, dislikes)
                } else {
                    (likes, dislikes + 1)
                }
            })
    }
}

#[async_trait]
impl UserRepository for MemoryForumStore {
    async fn get_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .get(&id)
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl VoteRepository for MemoryForumStore {
    async fn get_vote_type(&self, user_id: UserId, target: Target) -> AppResult<Option<Direction>> {
        let stored = self.tables.read().votes.get(&(user_id, target)).copied();
        stored.map(Direction::try_from).transpose()
    }

    async fn add_vote(&self, vote: &Vote) -> AppResult<()> {
        let mut tables = self.tables.write();
        let key = (vote.user_id, vote.target);
        if tables.votes.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "vote by user {} on {} already exists",
                vote.user_id, vote.target
            )));
        }
        tables.votes.insert(key, vote.direction.as_i64());
        Ok(())
    }

    async fn delete_vote(&self, vote: &Vote) -> AppResult<()> {
        self.tables
            .write()
            .votes
            .remove(&(vote.user_id, vote.target));
        Ok(())
    }
}

#[async_trait]
impl CredentialVerifier for MemoryForumStore {
    async fn verify(&self, login: &str, password: &str) -> AppResult<Option<UserId>> {
        let (id, password_hash) = {
            let tables = self.tables.read();
            match tables
                .users
                .values()
                .find(|stored| stored.user.email == login || stored.user.nickname == login)
            {
                Some(stored) => (stored.user.id, stored.password_hash.clone()),
                None => return Ok(None),
            }
        };

        // argon2 校验耗 CPU，放到阻塞线程池
        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || -> AppResult<bool> {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| AppError::internal(format!("Invalid password hash: {}", e)))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| AppError::internal(format!("Password check task failed: {}", e)))??;

        Ok(valid.then_some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_common::{CommentId, PostId};

    #[tokio::test]
    async fn test_verify_credentials() {
        let store = MemoryForumStore::new();
        let id = store.add_user("alice@example.com", "alice", "s3cret").unwrap();

        assert_eq!(store.verify("alice@example.com", "s3cret").await.unwrap(), Some(id));
        assert_eq!(store.verify("alice", "s3cret").await.unwrap(), Some(id));
        assert_eq!(store.verify("alice@example.com", "wrong").await.unwrap(), None);
        assert_eq!(store.verify("bob@example.com", "s3cret").await.unwrap(), None);
    }

    #[test]
    fn test_duplicate_user_is_conflict() {
        let store = MemoryForumStore::new();
        store.add_user("alice@example.com", "alice", "pw").unwrap();

        assert!(matches!(
            store.add_user("alice@example.com", "other", "pw"),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            store.add_user("other@example.com", "alice", "pw"),
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_one_vote_per_user_and_target() {
        let store = MemoryForumStore::new();
        let post = Target::Post(PostId(1));
        let like = Vote::new(UserId(1), post, Direction::Like);

        store.add_vote(&like).await.unwrap();
        let err = store
            .add_vote(&Vote::new(UserId(1), post, Direction::Dislike))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // 同 ID 的评论是不同对象
        store
            .add_vote(&Vote::new(UserId(1), Target::Comment(CommentId(1)), Direction::Dislike))
            .await
            .unwrap();

        assert_eq!(store.tally(post), (1, 0));
        assert_eq!(
            store.get_vote_type(UserId(1), post).await.unwrap(),
            Some(Direction::Like)
        );
        store.delete_vote(&like).await.unwrap();
        assert_eq!(store.get_vote_type(UserId(1), post).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_vote_type_column_holds_signed_values() {
        let store = MemoryForumStore::new();
        let post = Target::Post(PostId(2));
        store
            .add_vote(&Vote::new(UserId(1), post, Direction::Dislike))
            .await
            .unwrap();

        assert_eq!(store.tables.read().votes.get(&(UserId(1), post)), Some(&-1));
        assert_eq!(
            store.get_vote_type(UserId(1), post).await.unwrap(),
            Some(Direction::Dislike)
        );
        assert_eq!(store.tally(post), (0, 1));
    }
}
