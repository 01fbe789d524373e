//! Request body definitions.
//!
//! Only JSON bodies are modelled; the generated client passes the body
//! through to the injected request function untouched.

use serde::{Deserialize, Serialize};

use crate::schema::TsType;

/// A JSON request body declared by a backend endpoint.
///
/// ## Examples
///
/// ```
/// use typesync_define::{JsonBody, TsType};
///
/// let body = JsonBody::required(TsType::simple("string"));
/// assert!(body.required);
///
/// let body = JsonBody::optional(TsType::simple("string"));
/// assert!(!body.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonBody {
    /// Shape of the body.
    pub schema: TsType,
    /// Whether the backend rejects requests without a body.
    #[serde(default)]
    pub required: bool,
}

impl JsonBody {
    /// A body the backend requires.
    pub fn required(schema: TsType) -> Self {
        Self {
            schema,
            required: true,
        }
    }

    /// A body the backend accepts but does not require.
    pub fn optional(schema: TsType) -> Self {
        Self {
            schema,
            required: false,
        }
    }
}
