//! Database metrics.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Records how long a named query took.
pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!("database_query_duration_seconds", "query" => query_name).record(duration_secs);
}

/// Publishes connection pool gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one query and records the duration when finished.
///
/// ```ignore
/// let timer = QueryTimer::new("find_event_by_id");
/// let result = sqlx::query_as::<_, EventEntity>(...).fetch_optional(&pool).await;
/// timer.record_result(&result);
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }

    /// Records the duration and counts the query as failed on `Err`.
    pub fn record_result<T, E>(self, result: &Result<T, E>) {
        if result.is_err() {
            counter!("database_query_errors_total", "query" => self.query_name).increment(1);
        }
        self.record();
    }
}
