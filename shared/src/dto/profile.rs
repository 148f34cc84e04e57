use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::role::role_display_label;
use crate::validation::is_valid_email;

/// Profile of the signed-in administrator, as returned by the API.
///
/// The edit form treats this as read-only input and works on its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Role key such as `admin`. Displayed, never editable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ProfileRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Human readable role, or `None` when the record carries no role.
    pub fn role_label(&self) -> Option<&str> {
        self.role
            .as_deref()
            .filter(|role| !role.is_empty())
            .map(role_display_label)
    }
}

/// Payload sent when an administrator saves their profile.
///
/// The password pair is only present when a password change was requested;
/// absent fields are omitted from the JSON body rather than sent as null.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_password_pair", skip_on_field_errors = false))]
pub struct ProfileUpdateRequest {
    #[validate(custom = "validate_name_present")]
    pub name: String,

    #[validate(custom = "validate_email_shape")]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: Option<String>,
}

impl ProfileUpdateRequest {
    /// Request that only updates name and email.
    pub fn basic(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            current_password: None,
            new_password: None,
        }
    }

    /// Attaches a password change to the request.
    pub fn with_password_change(
        mut self,
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Self {
        self.current_password = Some(current_password.into());
        self.new_password = Some(new_password.into());
        self
    }

    pub fn changes_password(&self) -> bool {
        self.new_password.is_some()
    }
}

// Passwords never end up in logs.
impl fmt::Debug for ProfileUpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("ProfileUpdateRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("current_password", &redact(&self.current_password))
            .field("new_password", &redact(&self.new_password))
            .finish()
    }
}

// Same rules as the edit form, so a request the form accepts is never
// refused on the way out.
fn validate_name_present(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Name is required".into());
        return Err(error);
    }
    Ok(())
}

fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        let mut error = ValidationError::new("email");
        error.message = Some("Invalid email format".into());
        return Err(error);
    }
    Ok(())
}

fn validate_password_pair(request: &ProfileUpdateRequest) -> Result<(), ValidationError> {
    match (&request.current_password, &request.new_password) {
        (Some(_), Some(_)) | (None, None) => Ok(()),
        _ => {
            let mut error = ValidationError::new("password_pair");
            error.message = Some("Current and new password must be sent together".into());
            Err(error)
        }
    }
}

/// Response for a successful profile update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// Success message
    pub message: String,
    /// Profile as stored after the update
    pub profile: ProfileRecord,
}
