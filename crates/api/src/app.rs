use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::repositories::Repositories;
use domain::services::{
    DisabledNotificationService, LoggingNotificationService, NotificationService, Services,
};
use persistence::MemoryStore;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    applications, auth, collaborations, dashboard, events, health, matches, profile, resources,
};
use crate::services::AuthService;

/// Storage the application runs against.
pub enum Storage {
    Postgres(PgPool),
    Memory(MemoryStore),
}

impl Storage {
    pub fn repositories(&self) -> Repositories {
        match self {
            Storage::Postgres(pool) => persistence::postgres_repositories(pool.clone()),
            Storage::Memory(store) => store.repositories(),
        }
    }

    pub fn pool(&self) -> Option<PgPool> {
        match self {
            Storage::Postgres(pool) => Some(pool.clone()),
            Storage::Memory(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repos: Repositories,
    pub services: Services,
    pub auth: AuthService,
    pub jwt: Arc<JwtConfig>,
    /// Present only for the Postgres backend.
    pub pool: Option<PgPool>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    pub fn new(config: Config, storage: Storage) -> Result<Self, JwtError> {
        let jwt = Arc::new(JwtConfig::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.leeway_secs,
        )?);

        let notifier: Arc<dyn NotificationService> = if config.notifications.enabled {
            Arc::new(LoggingNotificationService::new(
                config.notifications.sender.clone(),
            ))
        } else {
            Arc::new(DisabledNotificationService)
        };

        // Zero disables rate limiting
        let rate_limiter = (config.security.rate_limit_per_minute > 0).then(|| {
            Arc::new(RateLimiterState::new(
                config.security.rate_limit_per_minute,
            ))
        });

        let repos = storage.repositories();
        let services = Services::new(&repos, notifier.clone());
        let auth = AuthService::new(repos.users.clone(), jwt.clone(), notifier);

        Ok(Self {
            config: Arc::new(config),
            repos,
            services,
            auth,
            jwt,
            pool: storage.pool(),
            rate_limiter,
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login));

    // Auth is the outermost route layer so rate limiting sees the caller.
    let member_routes = Router::new()
        .route(
            "/api/v1/applications",
            post(applications::submit_application),
        )
        .route("/api/v1/applications/me", get(applications::my_application))
        .route("/api/v1/matches", get(matches::compute_matches))
        .route("/api/v1/matches/offers", get(matches::offer_matches))
        .route("/api/v1/events", get(events::list_events))
        .route("/api/v1/events/:id", get(events::get_event))
        .route(
            "/api/v1/events/:id/register",
            post(events::register_for_event),
        )
        .route(
            "/api/v1/collaborations",
            post(collaborations::submit_collaboration),
        )
        .route(
            "/api/v1/collaborations/me",
            get(collaborations::my_collaborations),
        )
        .route(
            "/api/v1/collaborations/:id/deactivate",
            post(collaborations::deactivate_collaboration),
        )
        .route(
            "/api/v1/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/v1/resources", get(resources::list_resources))
        .route(
            "/api/v1/resources/:id/download",
            post(resources::download_resource),
        )
        .route(
            "/api/v1/admin/applications",
            get(applications::list_applications),
        )
        .route(
            "/api/v1/admin/applications/:id/review",
            post(applications::review_application),
        )
        .route("/api/v1/admin/events", post(events::create_event))
        .route("/api/v1/admin/resources", post(resources::create_resource))
        .route("/api/v1/admin/dashboard", get(dashboard::get_dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(member_routes)
        // Global middleware (bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
