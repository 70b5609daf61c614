//! Environment-variable helpers shared by the service configs.
//!
//! Each optional integration (GitHub OAuth, Stripe, LLM) owns a `from_env`
//! constructor in its own module; this module only holds the parsing
//! primitives and the process-wide settings read by `main`.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Parse `key` as `T`, falling back to `default` when unset or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Parse a boolean flag. Accepts `1/true/yes/on` and `0/false/no/off`.
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Read an env var, treating blank values as unset.
pub(crate) fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Absolute base URL of the deployed app, without a trailing slash.
#[must_use]
pub fn app_url() -> String {
    normalize_base_url(&env_nonempty("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_owned()))
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// Join `path` onto an absolute base URL.
#[must_use]
pub fn absolute_url(base: &str, path: &str) -> String {
    format!("{}/{}", normalize_base_url(base), path.trim_start_matches('/'))
}
