//! URL helpers for building answering-service endpoints.

/// Strip trailing slashes so endpoints can be appended safely.
///
/// ```
/// use chartchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("https://psc.example.com//"), "https://psc.example.com");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use chartchat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000/", "/api/v1/chat"),
///     "http://localhost:8000/api/v1/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

/// Check that a user-supplied API URL looks usable before it is stored.
pub fn validate_api_url(url: &str) -> Result<String, String> {
    let normalized = normalize_base_url(url);
    if normalized.is_empty() {
        return Err("API URL must not be empty".to_string());
    }
    let has_scheme = ["http://", "https://"]
        .iter()
        .any(|scheme| normalized.len() > scheme.len() && normalized.starts_with(scheme));
    if !has_scheme {
        return Err(format!(
            "API URL must start with http:// or https:// (got {normalized})"
        ));
    }
    Ok(normalized)
}
