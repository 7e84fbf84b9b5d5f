//! Periodic removal of expired session tokens.
//!
//! Expired rows are already ignored by authentication; this keeps the
//! `session_tokens` table from growing without bound.

use std::time::Duration;

use chrono::Utc;
use spooky_db::repositories::SessionTokenRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Delete expired session rows once. Returns the number removed.
pub async fn sweep(pool: &PgPool) -> Result<u64, sqlx::Error> {
    SessionTokenRepo::delete_expired(pool, Utc::now()).await
}

/// Run the cleanup loop every `every` until `cancel` is triggered.
pub async fn run(pool: PgPool, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Session cleanup job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session cleanup: purged expired tokens");
                    }
                    Ok(_) => tracing::debug!("Session cleanup: nothing to purge"),
                    Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
                }
            }
        }
    }
}
