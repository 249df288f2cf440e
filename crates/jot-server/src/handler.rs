use axum::extract::{Path, State};
use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;

use jot_actor::startup::{HEALTHCHECK_FAMILY, HEALTHCHECK_KEY};
use jot_types::{Reply, Request, LATEST_KEY};

use crate::error::ApiError;
use crate::router::AppState;

/// Render a reply as the positional-index JSON object clients expect:
/// a value becomes `{"0": v}`, a key listing `{"0": k0, "1": k1, ...}`.
fn indexed(reply: &Reply) -> Value {
    let mut map = Map::new();
    match reply {
        Reply::Value(v) => {
            map.insert("0".to_string(), Value::String(v.clone()));
        }
        Reply::KeyList(keys) => {
            for (i, key) in keys.iter().enumerate() {
                map.insert(i.to_string(), Value::String(key.clone()));
            }
        }
        Reply::Empty => {}
    }
    Value::Object(map)
}

fn expect_value(reply: Reply) -> Result<String, ApiError> {
    match reply {
        Reply::Value(v) => Ok(v),
        other => Err(ApiError::Internal(format!(
            "unexpected reply kind {:?} for get",
            other.kind()
        ))),
    }
}

/// `GET /health` — read back the liveness entry the sequencer wrote.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reply = state
        .store
        .call(Request::get(HEALTHCHECK_FAMILY, HEALTHCHECK_KEY))
        .await?;
    Ok(Json(indexed(&reply)))
}

/// `GET /values` — list every key in the configured family.
pub async fn list_values(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reply = state
        .store
        .call(Request::list_keys(state.family.as_str()))
        .await?;
    Ok(Json(indexed(&reply)))
}

/// `GET /value/{key}` — read one entry.
pub async fn get_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let reply = state
        .store
        .call(Request::get(state.family.as_str(), key))
        .await?;
    Ok(Json(indexed(&reply)))
}

/// `GET /latest_value` — resolve the latest-pointer, then fetch the entry
/// it names. Two sequential calls; the pair is deliberately not atomic.
pub async fn latest_value(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let pointer = state
        .store
        .call(Request::get(state.family.as_str(), LATEST_KEY))
        .await?;
    let key = expect_value(pointer)?;

    let reply = state
        .store
        .call(Request::get(state.family.as_str(), key.as_str()))
        .await?;
    let value = expect_value(reply)?;

    Ok(Json(json!({ key: value })))
}

/// `POST /input/{value}` — store a sample under the current minute and
/// repoint `latest` at it.
pub async fn put_value(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = Utc::now().format("%Y-%m-%dT%H:%M").to_string();

    state
        .store
        .call(Request::set(state.family.as_str(), &key, &value))
        .await?;
    state
        .store
        .call(Request::set(state.family.as_str(), LATEST_KEY, &key))
        .await?;

    debug!(family = %state.family, %key, "sample stored");
    Ok(Json(json!({ "message": "stored", "key": key })))
}
