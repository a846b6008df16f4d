//! The response envelope every API route speaks.
//!
//! Success bodies are `{ "status": "ok", ...payload }`; error bodies are
//! `{ "status": "error", "error": { "code": N, "message": "..." } }`.
//! Existing clients parse exactly this shape.

use axum::Json;
use serde_json::{json, Value};

/// Wrap a payload object in the success envelope.
pub fn success(payload: Value) -> Json<Value> {
    let mut body = json!({ "status": "ok" });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), payload.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    Json(body)
}

/// Build the error envelope body.
pub fn error_body(code: u16, message: &str) -> Value {
    json!({
        "status": "error",
        "error": {
            "code": code,
            "message": message,
        },
    })
}
