use crate::models::{RemoteUser, User};
use crate::utils::error::AppError;

/// Demo API consulted once, only when no snapshot exists yet
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Fetches the seed user list from the remote source. Called at most once
/// per session; there is no retry, a failure leaves the collection empty.
pub async fn fetch_users(url: &str) -> Result<Vec<User>, AppError> {
    log::info!("🌐 Fetching seed users from {}", url);

    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| AppError::FetchError(format!("Failed to reach remote source: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::FetchError(format!(
            "Remote source returned {}",
            response.status()
        )));
    }

    let remote: Vec<RemoteUser> = response
        .json()
        .await
        .map_err(|e| AppError::FetchError(format!("Failed to decode remote users: {}", e)))?;

    Ok(remote.into_iter().map(User::from).collect())
}
