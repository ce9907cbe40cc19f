use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use crate::error::LedgerError;
use crate::models::location::LocationCatalog;
use crate::models::ride::{Ride, RideRequest, RideStatus, Transition};

pub const DEFAULT_BASE_POINTS: u32 = 10;

/// In-memory record of every ride and the points each puller has earned.
///
/// The ledger does no locking of its own; callers that share it across tasks
/// wrap it in a single mutex so each operation applies atomically.
#[derive(Debug, Clone)]
pub struct Ledger {
    rides: Vec<Ride>,
    index: HashMap<String, usize>,
    puller_points: BTreeMap<String, u32>,
    next_ride: u64,
    base_points: u32,
    locations: LocationCatalog,
}

/// Read-only copy of the ledger handed to dashboards.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub rides: Vec<Ride>,
    pub puller_points: BTreeMap<String, u32>,
}

impl Ledger {
    pub fn new(base_points: u32, locations: LocationCatalog) -> Self {
        Self {
            rides: Vec::new(),
            index: HashMap::new(),
            puller_points: BTreeMap::new(),
            next_ride: 1,
            base_points,
            locations,
        }
    }

    /// Registers a puller with zero points unless they already have an entry.
    pub fn seed_puller(&mut self, puller_id: &str) {
        self.puller_points.entry(puller_id.to_string()).or_insert(0);
    }

    pub fn locations(&self) -> &LocationCatalog {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    pub fn create_ride(&mut self, request: RideRequest) -> Result<Ride, LedgerError> {
        let missing = request.missing_fields();
        let (pickup, destination, puller_id) =
            match (request.pickup, request.destination, request.puller_id) {
                (Some(pickup), Some(destination), Some(puller_id)) if missing.is_empty() => {
                    (pickup, destination, puller_id)
                }
                _ => return Err(LedgerError::MissingFields(missing)),
            };

        let id = format!("ride_{}", self.next_ride);
        self.next_ride += 1;

        let ride = Ride {
            id: id.clone(),
            distance_km: self.locations.distance_km(&pickup, &destination),
            pickup,
            destination,
            puller_id,
            status: RideStatus::Pending,
            request_time: Utc::now(),
            accept_time: None,
            pickup_time: None,
            dropoff_time: None,
            points: 0,
        };

        self.index.insert(id, self.rides.len());
        self.rides.push(ride.clone());
        Ok(ride)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            rides: self.rides.clone(),
            puller_points: self.puller_points.clone(),
        }
    }

    pub fn get(&self, ride_id: &str) -> Result<&Ride, LedgerError> {
        self.index
            .get(ride_id)
            .map(|&position| &self.rides[position])
            .ok_or_else(|| LedgerError::RideNotFound(ride_id.to_string()))
    }

    pub fn status(&self, ride_id: &str) -> Result<RideStatus, LedgerError> {
        self.get(ride_id).map(|ride| ride.status)
    }

    pub fn puller_count(&self) -> usize {
        self.puller_points.len()
    }

    pub fn puller_points(&self, puller_id: &str) -> Option<u32> {
        self.puller_points.get(puller_id).copied()
    }

    pub fn accept(&mut self, ride_id: &str) -> Result<Ride, LedgerError> {
        self.advance(ride_id, Transition::Accept)
    }

    pub fn confirm_pickup(&mut self, ride_id: &str) -> Result<Ride, LedgerError> {
        self.advance(ride_id, Transition::ConfirmPickup)
    }

    pub fn confirm_dropoff(&mut self, ride_id: &str) -> Result<Ride, LedgerError> {
        self.advance(ride_id, Transition::ConfirmDropoff)
    }

    /// Applies `transition` to the ride. The ride is left untouched on error.
    pub fn advance(&mut self, ride_id: &str, transition: Transition) -> Result<Ride, LedgerError> {
        let position = *self
            .index
            .get(ride_id)
            .ok_or_else(|| LedgerError::RideNotFound(ride_id.to_string()))?;
        let ride = &mut self.rides[position];

        if ride.status != transition.required_status() {
            return Err(LedgerError::InvalidTransition {
                ride_id: ride_id.to_string(),
                transition,
                status: ride.status,
            });
        }

        let now = Utc::now();
        ride.status = transition.target_status();
        match transition {
            Transition::Accept => ride.accept_time = Some(now),
            Transition::ConfirmPickup => ride.pickup_time = Some(now),
            Transition::ConfirmDropoff => {
                ride.dropoff_time = Some(now);
                ride.points = self.base_points;
                *self
                    .puller_points
                    .entry(ride.puller_id.clone())
                    .or_insert(0) += self.base_points;
            }
        }

        Ok(ride.clone())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_POINTS, LocationCatalog::default())
    }
}
