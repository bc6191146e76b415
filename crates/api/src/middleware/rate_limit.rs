//! Rate limiting middleware.
//!
//! Per-user request quotas for authenticated routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::user_auth::UserAuth;

type UserRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Fallback when the configured quota is zero.
const DEFAULT_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Rate limiter state shared across all requests, one limiter per user.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<Uuid, Arc<UserRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    fn get_or_create_limiter(&self, user_id: Uuid) -> Arc<UserRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(limiter) = limiters.get(&user_id) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap_or_else(|e| e.into_inner());
        limiters
            .entry(user_id)
            .or_insert_with(|| {
                let per_minute =
                    NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(DEFAULT_PER_MINUTE);
                Arc::new(GovRateLimiter::direct(Quota::per_minute(per_minute)))
            })
            .clone()
    }

    /// Returns `Err(retry_after_secs)` when the user is over quota.
    pub fn check(&self, user_id: Uuid) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(user_id);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(DefaultClock::default().now());
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self
            .limiters
            .read()
            .map(|l| l.len())
            .unwrap_or_default();
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &active)
            .finish()
    }
}

/// Applies per-user rate limiting. Must run after `require_user_auth`.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(user_id) = req.extensions().get::<UserAuth>().map(|a| a.user_id) else {
        return next.run(req).await;
    };

    if let Some(ref rate_limiter) = state.rate_limiter {
        if let Err(retry_after) = rate_limiter.check(user_id) {
            metrics::counter!("rate_limited_requests_total").increment(1);
            return rate_limited_response(state.config.security.rate_limit_per_minute, retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limit_exceeded",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retry_after": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_allows_requests() {
        let state = RateLimiterState::new(100);
        assert!(state.check(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_rate_limiter_exhaustion() {
        let state = RateLimiterState::new(2);
        let user = Uuid::new_v4();

        assert!(state.check(user).is_ok());
        assert!(state.check(user).is_ok());
        let retry_after = state.check(user).unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_rate_limiter_is_per_user() {
        let state = RateLimiterState::new(1);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(state.check(first).is_ok());
        assert!(state.check(first).is_err());
        assert!(state.check(second).is_ok());
    }

    #[test]
    fn test_zero_limit_falls_back_to_default() {
        let state = RateLimiterState::new(0);
        let user = Uuid::new_v4();
        for _ in 0..10 {
            assert!(state.check(user).is_ok());
        }
    }

    #[test]
    fn test_rate_limited_response_headers() {
        let response = rate_limited_response(60, 5);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "5");
    }
}
