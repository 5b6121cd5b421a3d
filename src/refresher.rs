use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::watch;
use tokio::time::interval;

use crate::board::{snapshot_from_rows, BoardSnapshot};
use crate::config::{BoardConfig, ConfigError};
use crate::feed;

pub const UPDATE_FAILED: &str = "Update failed—check network/sheet permissions.";

/// Periodic fetch → build → classify cycle.
///
/// A failed cycle keeps the last good view on screen and only swaps the
/// status line, so one bad poll never blanks the board.
pub struct BoardRefresher {
    config: BoardConfig,
    tz: Tz,
    snapshot: BoardSnapshot,
}

impl BoardRefresher {
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let tz = config.validate()?;
        Ok(Self {
            config,
            tz,
            snapshot: BoardSnapshot::default(),
        })
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub async fn refresh(&mut self, now: DateTime<Utc>) -> &BoardSnapshot {
        match self.load(now).await {
            Ok(snapshot) => {
                tracing::info!(
                    on_ice = snapshot.view.on_ice.len(),
                    up_next = snapshot.view.up_next.is_some(),
                    upcoming = snapshot.view.upcoming.len(),
                    "board refreshed"
                );
                self.snapshot = snapshot;
            }
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    url = %self.config.feed_url,
                    timestamp = %now.to_rfc3339(),
                    "failed to load sheet"
                );
                self.snapshot.status = UPDATE_FAILED.to_string();
            }
        }
        &self.snapshot
    }

    async fn load(&self, now: DateTime<Utc>) -> Result<BoardSnapshot> {
        let rows = feed::fetch_rows(&self.config.feed_url, self.config.feed_format)
            .await
            .with_context(|| format!("unable to refresh board from {}", self.config.feed_url))?;
        Ok(snapshot_from_rows(&rows, now, &self.config, self.tz))
    }

    /// Refreshes on every tick and publishes each snapshot until the last
    /// receiver goes away. The first tick fires immediately.
    pub async fn run(mut self, publisher: watch::Sender<BoardSnapshot>) {
        let period = Duration::from_secs(self.config.refresh_every_secs.max(1));
        let mut ticks = interval(period);

        loop {
            ticks.tick().await;
            let snapshot = self.refresh(Utc::now()).await.clone();
            if publisher.send(snapshot).is_err() {
                tracing::debug!("board receivers dropped, stopping refresher");
                break;
            }
        }
    }
}
