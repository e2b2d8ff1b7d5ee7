use thiserror::Error;

/// Errors raised at the decoding and configuration edges of the engine.
///
/// Zone resolution itself never fails; these only surface when turning
/// external JSON into zones or resolver settings.
#[derive(Debug, Error)]
pub enum GeofenceError {
    #[error("zone payload could not be decoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error("resolver envelope field `{field}` is invalid: {reason}")]
    InvalidEnvelope {
        field: &'static str,
        reason: String,
    },
}
