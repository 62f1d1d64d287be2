//! HTTP API for the index server
//!
//! One wildcard route: the request path is the key. GET/HEAD redirect the
//! client to the volume holding the blob (the index tier never proxies reads,
//! trading a round trip for avoiding double data transfer). PUT streams the
//! body to the primary volume and then commits the mapping. DELETE drops the
//! mapping first and then removes the remote blob. Every other method is 405.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::common::{key_path, Result};
use crate::index::mapping::MappingStore;
use crate::index::placement::PlacementPolicy;
use crate::index::volume_client::{StoreOutcome, VolumeClient};

/// Shared index server state for HTTP handlers.
#[derive(Clone)]
pub struct IndexState {
    pub mapping: Arc<MappingStore>,
    pub placement: Arc<PlacementPolicy>,
    pub volumes: Arc<VolumeClient>,
}

/// Creates the HTTP router. The path is the key; unknown methods get a 405
/// from the method router.
pub fn create_router(state: IndexState) -> Router {
    Router::new()
        .route("/*key", get(get_key).put(put_key).delete(delete_key))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET/HEAD: redirect to the stored primary target.
///
/// The stored mapping is the canonical source of truth for reads; placement
/// is only consulted at write time.
async fn get_key(State(state): State<IndexState>, Path(key): Path<String>) -> Result<Response> {
    let target = state
        .mapping
        .get(key.as_bytes())?
        .ok_or_else(|| crate::Error::NotFound(key.clone()))?;

    let location = VolumeClient::object_url(&target, &key_path(key.as_bytes()));
    tracing::debug!(%key, %location, "redirecting read");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// PUT: write-once create.
///
/// Remote store first, local mapping second. If the volume write fails, no
/// mapping is written; a partially written blob on the volume is an accepted
/// leak (no compensating delete).
async fn put_key(
    State(state): State<IndexState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response> {
    let content_length: u64 = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    if content_length == 0 {
        return Err(crate::Error::LengthRequired);
    }

    // contains + put are not atomic as a pair: concurrent PUTs for the same
    // key can race past this check (see DESIGN.md)
    if state.mapping.contains(key.as_bytes())? {
        return Err(crate::Error::KeyExists(key));
    }

    let target = state.placement.primary_target(key.as_bytes());
    let url = VolumeClient::object_url(&target, &key_path(key.as_bytes()));

    // stream the request body straight through; a client disconnect aborts
    // the volume call and no mapping is written
    let outcome = state
        .volumes
        .store(
            &url,
            content_length,
            reqwest::Body::wrap_stream(body.into_data_stream()),
        )
        .await;

    match outcome {
        StoreOutcome::Created | StoreOutcome::NoContent => {
            state.mapping.put(key.as_bytes(), &target)?;
            tracing::debug!(%key, volume = %target.volume, subvolume = target.subvolume, "stored");
            Ok(StatusCode::CREATED.into_response())
        }
        StoreOutcome::Conflict => Err(crate::Error::VolumeStore {
            volume: target.volume,
            detail: "volume reported conflict".into(),
        }),
        StoreOutcome::Failure(detail) => Err(crate::Error::VolumeStore {
            volume: target.volume,
            detail,
        }),
    }
}

/// DELETE: drop the local mapping first, then remove the remote blob.
///
/// If the remote call fails the mapping is already gone and the blob becomes
/// unaddressable; the mapping store stays the unambiguous authority.
async fn delete_key(State(state): State<IndexState>, Path(key): Path<String>) -> Result<Response> {
    let target = state
        .mapping
        .get(key.as_bytes())?
        .ok_or_else(|| crate::Error::NotFound(key.clone()))?;

    state.mapping.delete(key.as_bytes())?;

    let url = VolumeClient::object_url(&target, &key_path(key.as_bytes()));
    match state.volumes.remove(&url).await {
        StoreOutcome::NoContent | StoreOutcome::Created => {
            tracing::debug!(%key, volume = %target.volume, "deleted");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        StoreOutcome::Conflict => Err(crate::Error::VolumeRemove {
            volume: target.volume,
            detail: "volume reported conflict".into(),
        }),
        StoreOutcome::Failure(detail) => Err(crate::Error::VolumeRemove {
            volume: target.volume,
            detail,
        }),
    }
}
