use crate::api::api_url;
use crate::config::Config;
use gloo_net::http::{RequestBuilder, Response};
use gloo_storage::Storage;
use log::debug;
use serde::Deserialize;
use shared::{ProfileRecord, ProfileUpdateRequest, Result, SharedError, UpdateResponse};
use validator::Validate;

const PROFILE_PATH: &str = "/api/admin/profile";

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Attaches the stored session id, if any, as a bearer token.
fn with_session(builder: RequestBuilder) -> RequestBuilder {
    match gloo_storage::LocalStorage::get::<String>(Config::session_storage_key()) {
        Ok(session_id) => builder.header("Authorization", &format!("Bearer {}", session_id)),
        Err(_) => builder,
    }
}

/// Maps a non-2xx status and its message onto the shared error kinds.
pub fn status_error(status: u16, message: String) -> SharedError {
    match status {
        401 | 403 => SharedError::Unauthorized(message),
        404 => SharedError::NotFound(message),
        400 | 422 => SharedError::BadRequest(message),
        _ => SharedError::Submission(message),
    }
}

async fn error_from_response(response: Response) -> SharedError {
    let status = response.status();
    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("HTTP {}", status));
    status_error(status, message)
}

/// Checks a request before it leaves the browser.
pub fn check_update_request(request: &ProfileUpdateRequest) -> Result<()> {
    request.validate()?;
    Ok(())
}

pub async fn fetch_admin_profile() -> Result<ProfileRecord> {
    debug!("Fetching admin profile");

    let response = with_session(gloo_net::http::Request::get(&api_url(PROFILE_PATH)))
        .send()
        .await
        .map_err(|e| SharedError::Network(format!("Failed to send profile request: {}", e)))?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    let profile = response
        .json::<ProfileRecord>()
        .await
        .map_err(|e| SharedError::Conversion(format!("Failed to parse profile response: {}", e)))?;

    debug!("Fetched admin profile for {}", profile.email);
    Ok(profile)
}

pub async fn update_admin_profile(request: &ProfileUpdateRequest) -> Result<UpdateResponse> {
    check_update_request(request)?;
    debug!(
        "Updating admin profile (password change: {})",
        request.changes_password()
    );

    let response = with_session(gloo_net::http::Request::put(&api_url(PROFILE_PATH)))
        .json(request)
        .map_err(|e| SharedError::Conversion(format!("Failed to serialize profile update: {}", e)))?
        .send()
        .await
        .map_err(|e| SharedError::Network(format!("Failed to send profile update: {}", e)))?;

    if !response.ok() {
        return Err(error_from_response(response).await);
    }

    let update_response = response
        .json::<UpdateResponse>()
        .await
        .map_err(|e| SharedError::Conversion(format!("Failed to parse update response: {}", e)))?;

    debug!("Successfully updated admin profile");
    Ok(update_response)
}
