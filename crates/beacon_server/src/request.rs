//! Request body types for the lookup routes.

use serde::{Deserialize, Serialize};

/// Body of `POST /check-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    /// Snowflake of the user to look up.
    pub user_id: u64,
}
