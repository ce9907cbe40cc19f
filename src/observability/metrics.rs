use prometheus::{
    Encoder, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

use crate::models::ride::{RideStatus, Transition};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub rides_created_total: IntCounter,
    pub ride_transitions_total: IntCounterVec,
    pub rides_by_status: IntGaugeVec,
    pub points_awarded_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let rides_created_total =
            IntCounter::new("rides_created_total", "Total ride requests accepted")
                .expect("valid rides_created_total metric");

        let ride_transitions_total = IntCounterVec::new(
            Opts::new(
                "ride_transitions_total",
                "Ride transitions attempted by transition and outcome",
            ),
            &["transition", "outcome"],
        )
        .expect("valid ride_transitions_total metric");

        let rides_by_status = IntGaugeVec::new(
            Opts::new("rides_by_status", "Current number of rides in each status"),
            &["status"],
        )
        .expect("valid rides_by_status metric");

        let points_awarded_total =
            IntCounter::new("points_awarded_total", "Total points awarded to pullers")
                .expect("valid points_awarded_total metric");

        registry
            .register(Box::new(rides_created_total.clone()))
            .expect("register rides_created_total");
        registry
            .register(Box::new(ride_transitions_total.clone()))
            .expect("register ride_transitions_total");
        registry
            .register(Box::new(rides_by_status.clone()))
            .expect("register rides_by_status");
        registry
            .register(Box::new(points_awarded_total.clone()))
            .expect("register points_awarded_total");

        for status in RideStatus::ALL {
            rides_by_status.with_label_values(&[status.as_str()]).set(0);
        }

        Self {
            registry,
            rides_created_total,
            ride_transitions_total,
            rides_by_status,
            points_awarded_total,
        }
    }

    pub fn record_created(&self) {
        self.rides_created_total.inc();
        self.rides_by_status
            .with_label_values(&[RideStatus::Pending.as_str()])
            .inc();
    }

    pub fn record_transition(&self, transition: Transition, points: u32) {
        self.ride_transitions_total
            .with_label_values(&[transition.as_str(), "success"])
            .inc();
        self.rides_by_status
            .with_label_values(&[transition.required_status().as_str()])
            .dec();
        self.rides_by_status
            .with_label_values(&[transition.target_status().as_str()])
            .inc();
        self.points_awarded_total.inc_by(u64::from(points));
    }

    pub fn record_rejected(&self, transition: Transition) {
        self.ride_transitions_total
            .with_label_values(&[transition.as_str(), "rejected"])
            .inc();
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
