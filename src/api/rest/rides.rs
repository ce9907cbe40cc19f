use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::event::RideEvent;
use crate::models::ride::{Ride, RideRequest, RideStatus, Transition};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/request-ride", post(request_ride))
        .route("/rides", get(list_rides))
        .route("/ride-status/:id", get(ride_status))
        .route("/accept-ride/:id", post(accept_ride))
        .route("/confirm-pickup/:id", post(confirm_pickup))
        .route("/confirm-dropoff/:id", post(confirm_dropoff))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideCreatedResponse {
    pub message: &'static str,
    pub ride_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RidesResponse {
    pub rides: Vec<Ride>,
    pub puller_points: BTreeMap<String, u32>,
}

#[derive(Serialize)]
pub struct RideStatusResponse {
    pub status: RideStatus,
}

/// Embedded clients post without a content type or with an empty body; both
/// are treated as a request with every field missing.
fn parse_ride_request(body: &[u8]) -> Result<RideRequest, AppError> {
    if body.trim_ascii().is_empty() {
        return Ok(RideRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("Invalid ride request: {err}.")))
}

async fn request_ride(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RideCreatedResponse>), AppError> {
    let payload = parse_ride_request(&body)?;

    let ride = {
        let mut ledger = state.ledger.lock().await;
        let ride = ledger.create_ride(payload)?;

        // published under the lock so subscribers see ledger order
        state.metrics.record_created();
        let _ = state.ride_events_tx.send(RideEvent::from_ride(&ride));
        ride
    };

    info!(
        ride_id = %ride.id,
        pickup = %ride.pickup,
        destination = %ride.destination,
        puller_id = %ride.puller_id,
        "ride requested"
    );

    Ok((
        StatusCode::CREATED,
        Json(RideCreatedResponse {
            message: "Ride request created successfully.",
            ride_id: ride.id,
        }),
    ))
}

async fn list_rides(State(state): State<Arc<AppState>>) -> Json<RidesResponse> {
    let snapshot = state.ledger.lock().await.snapshot();

    Json(RidesResponse {
        rides: snapshot.rides,
        puller_points: snapshot.puller_points,
    })
}

async fn ride_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RideStatusResponse>, AppError> {
    let status = state.ledger.lock().await.status(&id)?;
    Ok(Json(RideStatusResponse { status }))
}

async fn accept_ride(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ride>, AppError> {
    advance_ride(&state, &id, Transition::Accept).await
}

async fn confirm_pickup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ride>, AppError> {
    advance_ride(&state, &id, Transition::ConfirmPickup).await
}

async fn confirm_dropoff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ride>, AppError> {
    advance_ride(&state, &id, Transition::ConfirmDropoff).await
}

/// Unknown rides and rides in the wrong state both answer with the
/// transition's 404; the ledger error is only logged.
async fn advance_ride(
    state: &AppState,
    id: &str,
    transition: Transition,
) -> Result<Json<Ride>, AppError> {
    let mut ledger = state.ledger.lock().await;

    let ride = match ledger.advance(id, transition) {
        Ok(ride) => ride,
        Err(err) => {
            debug!(ride_id = %id, %transition, error = %err, "ride transition rejected");
            state.metrics.record_rejected(transition);
            return Err(AppError::NotFound(transition.failure_message().to_string()));
        }
    };

    state.metrics.record_transition(transition, ride.points);
    let _ = state.ride_events_tx.send(RideEvent::from_ride(&ride));
    drop(ledger);

    if ride.status == RideStatus::Completed {
        info!(ride_id = %ride.id, puller_id = %ride.puller_id, points = ride.points, "ride completed");
    } else {
        info!(ride_id = %ride.id, status = %ride.status, "ride advanced");
    }

    Ok(Json(ride))
}
