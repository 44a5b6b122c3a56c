//! JSON response envelope shared by every booking outcome.
//!
//! ```text
//! 200  {"success": true}
//! 400  {"success": false, "message": "..."}
//! 429  {"success": false, "message": "Too many booking attempts. Please try again later."}
//! 500  {"success": false}
//! ```
//!
//! No response carries the stored record or its identifier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: None,
        }
    }
}
