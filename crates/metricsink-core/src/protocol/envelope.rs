//! Response envelope for every non-array JSON response.
//!
//! ```json
//! { "success": true, "message": "healthy", "data": { "message": "..." } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::status_message;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl Envelope<Value> {
    /// Failure with a caller-visible explanation: `data.message` holds the detail,
    /// `message` the fixed status text.
    pub fn failure(status: u16, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: status_message(status).to_string(),
            data: json!({ "message": detail.into() }),
        }
    }

    /// Failure that exposes nothing beyond the status text.
    pub fn opaque_failure(status: u16) -> Self {
        Self {
            success: false,
            message: status_message(status).to_string(),
            data: Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_shape() {
        let v = serde_json::to_value(Envelope::failure(400, "nope")).unwrap_or_default();
        assert_eq!(v, json!({"success": false, "message": "Bad request", "data": {"message": "nope"}}));

        let v = serde_json::to_value(Envelope::opaque_failure(500)).unwrap_or_default();
        assert_eq!(v, json!({"success": false, "message": "Internal server error", "data": null}));
    }
}
