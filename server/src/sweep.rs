use std::str::FromStr;
use std::time::Duration;

use application::service::NotifyOverdueService;
use application::transfer::NotifyOverdueDto;

use crate::handler::AppModule;

static SWEEP_INTERVAL_SECS: &str = "SWEEP_INTERVAL_SECS";
static OVERDUE_LOOKAHEAD_DAYS: &str = "OVERDUE_LOOKAHEAD_DAYS";

/// Spawns the periodic overdue sweep. The first run fires right after boot.
pub fn spawn(module: AppModule) {
    let interval_secs: u64 = env_or(SWEEP_INTERVAL_SECS, 86_400);
    let lookahead_days: i64 = env_or(OVERDUE_LOOKAHEAD_DAYS, 1);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            match module
                .notify_overdue_borrowings(NotifyOverdueDto { lookahead_days })
                .await
            {
                Ok(count) => tracing::info!("Overdue sweep finished, {count} notifications sent"),
                Err(report) => tracing::error!("{report:?}"),
            }
        }
    });
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
