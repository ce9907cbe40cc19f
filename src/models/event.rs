use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ride::{Ride, RideStatus};

/// Pushed to websocket subscribers whenever a ride is created or advanced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideEvent {
    pub ride_id: String,
    pub puller_id: String,
    pub status: RideStatus,
    pub points: u32,
    pub at: DateTime<Utc>,
}

impl RideEvent {
    pub fn from_ride(ride: &Ride) -> Self {
        Self {
            ride_id: ride.id.clone(),
            puller_id: ride.puller_id.clone(),
            status: ride.status,
            points: ride.points,
            at: Utc::now(),
        }
    }
}
