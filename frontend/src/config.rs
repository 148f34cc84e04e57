pub struct Config;

impl Config {
    /// Base URL prepended to API paths.
    ///
    /// Left empty: in development Trunk proxies `/api/` to the backend and in
    /// production nginx does the same, so relative URLs work for both.
    pub fn api_base_url() -> String {
        option_env!("ADMIN_API_BASE_URL").unwrap_or_default().to_string()
    }

    /// Local storage key holding the session id issued at login.
    pub fn session_storage_key() -> &'static str {
        "session_id"
    }
}
