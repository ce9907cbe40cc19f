use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
}

impl RideStatus {
    pub const ALL: [RideStatus; 4] = [
        RideStatus::Pending,
        RideStatus::Accepted,
        RideStatus::InProgress,
        RideStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Pending => "pending",
            RideStatus::Accepted => "accepted",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only ways a ride may move forward. Each variant accepts exactly one
/// prior status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Accept,
    ConfirmPickup,
    ConfirmDropoff,
}

impl Transition {
    pub fn required_status(&self) -> RideStatus {
        match self {
            Transition::Accept => RideStatus::Pending,
            Transition::ConfirmPickup => RideStatus::Accepted,
            Transition::ConfirmDropoff => RideStatus::InProgress,
        }
    }

    pub fn target_status(&self) -> RideStatus {
        match self {
            Transition::Accept => RideStatus::Accepted,
            Transition::ConfirmPickup => RideStatus::InProgress,
            Transition::ConfirmDropoff => RideStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Accept => "accept",
            Transition::ConfirmPickup => "confirm_pickup",
            Transition::ConfirmDropoff => "confirm_dropoff",
        }
    }

    /// Message returned to clients when this transition cannot be applied.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Transition::Accept => "Unable to accept ride.",
            Transition::ConfirmPickup => "Unable to confirm pickup.",
            Transition::ConfirmDropoff => "Unable to confirm drop-off.",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: String,
    pub pickup: String,
    pub destination: String,
    pub puller_id: String,
    pub status: RideStatus,
    pub request_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_time: Option<DateTime<Utc>>,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Incoming ride request as sent by the client device. Every field is optional
/// on the wire so that missing fields surface as a validation error instead of
/// a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub pickup: Option<String>,
    pub destination: Option<String>,
    pub puller_id: Option<String>,
}

impl RideRequest {
    pub fn new(
        pickup: impl Into<String>,
        destination: impl Into<String>,
        puller_id: impl Into<String>,
    ) -> Self {
        Self {
            pickup: Some(pickup.into()),
            destination: Some(destination.into()),
            puller_id: Some(puller_id.into()),
        }
    }

    /// Names of the fields that are absent or blank, in wire order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("pickup", &self.pickup),
            ("destination", &self.destination),
            ("pullerId", &self.puller_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{RideRequest, RideStatus, Transition};

    #[test]
    fn transitions_chain_forward_through_every_status() {
        let chain = [
            Transition::Accept,
            Transition::ConfirmPickup,
            Transition::ConfirmDropoff,
        ];

        let mut status = RideStatus::Pending;
        for transition in chain {
            assert_eq!(transition.required_status(), status);
            assert!(transition.target_status() > status);
            status = transition.target_status();
        }
        assert_eq!(status, RideStatus::Completed);
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&RideStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(RideStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn missing_fields_reports_absent_and_blank_values() {
        let request = RideRequest {
            pickup: Some("CUET Campus".to_string()),
            destination: Some("   ".to_string()),
            puller_id: None,
        };
        assert_eq!(request.missing_fields(), vec!["destination", "pullerId"]);
    }

    #[test]
    fn complete_request_has_no_missing_fields() {
        let request = RideRequest::new("CUET Campus", "Pahartoli", "puller_001");
        assert!(request.missing_fields().is_empty());
    }

    #[test]
    fn request_deserializes_camel_case_puller_id() {
        let request: RideRequest =
            serde_json::from_str(r#"{"pickup":"A","destination":"B","pullerId":"p"}"#).unwrap();
        assert_eq!(request.puller_id.as_deref(), Some("p"));
    }
}
