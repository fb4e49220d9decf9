use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::AppState;

const MAX_ATTEMPTS: u32 = 5;
const WINDOW_SECS: u64 = 60;

/// Fixed-window attempt counter keyed by client. Single instance only.
#[derive(Clone, Default)]
pub struct RateLimitState {
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

struct Window {
    attempts: u32,
    opened: Instant,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Ok(remaining)` while under the limit, `Err(retry_after)` once exhausted.
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        self.check_with_limits(key, MAX_ATTEMPTS, WINDOW_SECS).await
    }

    pub async fn check_with_limits(
        &self,
        key: &str,
        max_attempts: u32,
        window_secs: u64,
    ) -> Result<u32, Duration> {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let length = Duration::from_secs(window_secs);

        let window = windows.entry(key.to_string()).or_insert(Window {
            attempts: 0,
            opened: now,
        });

        if now.duration_since(window.opened) > length {
            window.attempts = 0;
            window.opened = now;
        }

        if window.attempts >= max_attempts {
            return Err(length.saturating_sub(now.duration_since(window.opened)));
        }

        window.attempts += 1;
        Ok(max_attempts - window.attempts)
    }

    /// Drops windows idle for two full lengths. Run from a background task.
    pub async fn cleanup(&self) {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let keep = Duration::from_secs(WINDOW_SECS * 2);

        windows.retain(|_, window| now.duration_since(window.opened) < keep);
    }

    pub async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Runs [`RateLimitState::cleanup`] every `period` for the life of the process.
pub fn spawn_rate_limit_sweeper(limiter: RateLimitState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            limiter.cleanup().await;
            let tracked = limiter.tracked_keys().await;
            tracing::debug!(tracked, "Rate limiter swept");
        }
    })
}

/// Throttles login attempts per client IP and path.
pub async fn rate_limit_login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = req.uri().path().to_string();
    let key = format!("{}:{}", ip, path);

    match state.rate_limiter.check(&key).await {
        Ok(remaining) => {
            tracing::debug!(ip = %ip, path = %path, remaining, "Login attempt allowed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                ip = %ip,
                path = %path,
                retry_after_secs = retry_after.as_secs(),
                "Login rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}
