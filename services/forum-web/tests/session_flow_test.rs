use std::sync::Arc;

use chrono::Duration;
use forum_auth_core::SessionAuthority;
use forum_common::ManualClock;
use forum_errors::AppError;
use forum_web::application::{CurrentUser, SignInCommand, SignInHandler, sign_out};
use forum_web::infrastructure::MemoryForumStore;

struct Fixture {
    clock: ManualClock,
    sessions: Arc<SessionAuthority>,
    sign_in: SignInHandler,
    current_user: CurrentUser,
}

fn setup() -> Fixture {
    let clock = ManualClock::default();
    let sessions = Arc::new(SessionAuthority::with_clock(
        Duration::seconds(120),
        Arc::new(clock.clone()),
    ));
    let store = Arc::new(MemoryForumStore::new());
    store
        .add_user("alice@example.com", "alice", "correct horse")
        .unwrap();

    Fixture {
        clock,
        sign_in: SignInHandler::new(sessions.clone(), store.clone()),
        current_user: CurrentUser::new(sessions.clone(), store),
        sessions,
    }
}

fn credentials(email: &str, password: &str) -> SignInCommand {
    SignInCommand {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_sign_in_then_load_current_user() {
    let fx = setup();

    let session = fx
        .sign_in
        .handle(credentials("  alice@example.com ", "correct horse"))
        .await
        .unwrap();
    let user = fx.current_user.load(Some(&session.token)).await.unwrap();

    assert_eq!(user.unwrap().nickname, "alice");
}

#[tokio::test]
async fn test_wrong_password_creates_no_session() {
    let fx = setup();

    let err = fx
        .sign_in
        .handle(credentials("alice@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(fx.sessions.is_empty());
}

#[tokio::test]
async fn test_blank_credentials_are_rejected() {
    let fx = setup();

    let err = fx.sign_in.handle(credentials("   ", "")).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_second_sign_in_logs_out_first_tab() {
    let fx = setup();

    let first = fx
        .sign_in
        .handle(credentials("alice@example.com", "correct horse"))
        .await
        .unwrap();
    let second = fx
        .sign_in
        .handle(credentials("alice", "correct horse"))
        .await
        .unwrap();

    assert!(fx.current_user.identify(Some(&first.token)).is_none());
    assert_eq!(
        fx.current_user.identify(Some(&second.token)),
        Some(second.user_id)
    );
}

#[tokio::test]
async fn test_sign_out_and_expiry() {
    let fx = setup();
    let session = fx
        .sign_in
        .handle(credentials("alice@example.com", "correct horse"))
        .await
        .unwrap();

    assert!(sign_out(&fx.sessions, Some(&session.token)));
    assert!(!sign_out(&fx.sessions, Some(&session.token)));
    assert!(!sign_out(&fx.sessions, None));
    assert_eq!(fx.current_user.load(Some(&session.token)).await.unwrap(), None);

    let session = fx
        .sign_in
        .handle(credentials("alice@example.com", "correct horse"))
        .await
        .unwrap();
    fx.clock.advance(Duration::seconds(121));

    assert_eq!(fx.current_user.identify(Some(&session.token)), None);
    assert_eq!(fx.current_user.identify(Some(&session.token)), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_sign_ins_leave_one_live_session() {
    let fx = Arc::new(setup());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let fx = fx.clone();
            tokio::spawn(async move {
                fx.sign_in
                    .handle(credentials("alice@example.com", "correct horse"))
                    .await
                    .unwrap()
                    .token
            })
        })
        .collect();

    let mut tokens = Vec::new();
    for handle in handles {
        tokens.push(handle.await.unwrap());
    }
    let live = tokens
        .iter()
        .filter(|token| fx.current_user.identify(Some(*token)).is_some())
        .count();

    assert_eq!(live, 1);
    assert_eq!(fx.sessions.len(), 1);
}
