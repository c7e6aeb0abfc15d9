//! 共享应用状态

use std::sync::Arc;

use forum_auth_core::SessionAuthority;
use forum_config::SessionConfig;
use forum_ports::{CredentialVerifier, UserRepository, VoteRepository};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::{CurrentUser, RateHandler, SignInHandler, VoteLocks};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionAuthority>,
    pub sign_in: Arc<SignInHandler>,
    pub current_user: Arc<CurrentUser>,
    pub rate: Arc<RateHandler>,
    pub cookie_name: Arc<str>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// 用同一个存储实现装配所有处理器
    pub fn new<S>(config: &SessionConfig, sessions: Arc<SessionAuthority>, store: Arc<S>) -> Self
    where
        S: UserRepository + VoteRepository + CredentialVerifier + 'static,
    {
        Self {
            sign_in: Arc::new(SignInHandler::new(sessions.clone(), store.clone())),
            current_user: Arc::new(CurrentUser::new(sessions.clone(), store.clone())),
            rate: Arc::new(RateHandler::new(store.clone(), store, VoteLocks::new())),
            sessions,
            cookie_name: Arc::from(config.cookie_name.as_str()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
