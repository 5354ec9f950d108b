//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Server-assigned identifier, unique and never reused
    #[schema(example = 1)]
    pub id: u64,
    /// Display name
    #[schema(example = "Alice Johnson")]
    pub name: String,
    /// Contact email address
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Incoming user payload for create and update requests.
///
/// A client-supplied `id` is accepted but never honored: creates let the
/// store assign one and updates take the id from the request path.
/// `name` and `email` default to empty strings so that an absent field
/// shows up as a field-level validation error rather than a parse error.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    /// Ignored when present
    pub id: Option<u64>,
    /// Display name (must be non-empty)
    #[serde(default)]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Alice Johnson")]
    pub name: String,
    /// Contact email address
    #[serde(default)]
    #[validate(email(message = "Email must be a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl UserPayload {
    /// Convert into a `User` carrying `id`, discarding any id the payload held.
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
