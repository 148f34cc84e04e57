pub mod models {
    pub mod role;
}

pub mod dto {
    pub mod profile;
}

pub mod error;
pub mod validation;

// Re-export commonly used items
pub use error::{SharedError, Result};

pub use models::role::{role_display_label, ADMIN_ROLE};

pub use dto::profile::{ProfileRecord, ProfileUpdateRequest, UpdateResponse};
