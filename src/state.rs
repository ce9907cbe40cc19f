use std::path::PathBuf;

use tokio::sync::{Mutex, broadcast};

use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::event::RideEvent;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub ride_events_tx: broadcast::Sender<RideEvent>,
    pub metrics: Metrics,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(ledger: Ledger, event_buffer_size: usize, static_dir: impl Into<PathBuf>) -> Self {
        let (ride_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            ledger: Mutex::new(ledger),
            ride_events_tx,
            metrics: Metrics::new(),
            static_dir: static_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut ledger = Ledger::new(config.base_points_per_ride, config.locations.clone());
        for puller_id in &config.seed_pullers {
            ledger.seed_puller(puller_id);
        }

        Self::new(ledger, config.event_buffer_size, config.static_dir.clone())
    }
}
