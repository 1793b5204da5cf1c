//! Planet route handlers.
//!
//! Each handler depends on exactly one planet capability, decodes and
//! validates its payload, and is the only place that maps a library outcome
//! to a status code. Internal error text is logged with the request id and
//! never sent to the client.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use planets_lib::{NewPlanet, Planet, PlanetGetter, PlanetId, PlanetInserter, PlanetUpdater};
use planets_service_shared::{decode_and_validate, ErrorResponse, PlanetRequest, RequestId};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Wire form of a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetDto {
    pub id: String,
    pub name: String,
}

impl From<&Planet> for PlanetDto {
    fn from(planet: &Planet) -> Self {
        Self {
            id: planet.id.to_hex(),
            name: planet.name.clone(),
        }
    }
}

/// Handle `POST /v1/planets`.
pub async fn create_planet(
    State(inserter): State<Arc<dyn PlanetInserter>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Response {
    let request: PlanetRequest = match decode_and_validate(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "rejected create payload");
            return ErrorResponse::from(e).into_response();
        }
    };

    match inserter.insert(NewPlanet::new(request.into_name())).await {
        Ok(planet) => {
            info!(request_id = %request_id, id = %planet.id, "planet created");
            (StatusCode::CREATED, Json(PlanetDto::from(&planet))).into_response()
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to insert the planet");
            ErrorResponse::insert_failed().into_response()
        }
    }
}

/// Handle `GET /v1/planets/{id}`.
///
/// The id is passed through verbatim; a malformed id is simply not found.
pub async fn get_planet(
    State(getter): State<Arc<dyn PlanetGetter>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Response {
    match getter.get_by_id(&id).await {
        Ok(planet) => (StatusCode::OK, Json(PlanetDto::from(&planet))).into_response(),
        Err(e) if e.is_not_found() => {
            info!(request_id = %request_id, id = %id, "planet not found");
            ErrorResponse::planet_not_found().into_response()
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                id = %id,
                error = %e,
                "failed to retrieve a planet by id"
            );
            ErrorResponse::retrieve_failed().into_response()
        }
    }
}

/// Handle `PUT /v1/planets/{id}`.
pub async fn update_planet(
    State(updater): State<Arc<dyn PlanetUpdater>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let request: PlanetRequest = match decode_and_validate(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "rejected update payload");
            return ErrorResponse::from(e).into_response();
        }
    };

    let planet = Planet {
        id: PlanetId::parse_lenient(&id),
        name: request.into_name(),
    };

    match updater.update(planet).await {
        // Unreachable through PlanetService, which reports zero matches as
        // not found; kept for other capability implementations.
        Ok(0) => {
            info!(request_id = %request_id, id = %id, "update matched no planet");
            ErrorResponse::planet_not_found().into_response()
        }
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) if e.is_not_found() => {
            info!(request_id = %request_id, id = %id, "planet not found");
            ErrorResponse::planet_not_found().into_response()
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                id = %id,
                error = %e,
                "failed to update the planet"
            );
            ErrorResponse::update_failed().into_response()
        }
    }
}
