//! Profile lookup flow
//!
//! Reads the session cache, falls back to the GitHub API, stores the result,
//! and renders whatever came out in the requested format.

use std::io;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::CacheManager;
use crate::cli::{OutputFormat, StartupConfig};
use crate::data::{GithubClient, GithubError, Profile};
use crate::ui::{self, FETCH_ERROR_MESSAGE};

/// A failed lookup. Every cause collapses to the same user-facing message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Cannot reach or not found!")]
    Unavailable(#[source] GithubError),
}

/// Failures that prevent producing any output at all
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to set up HTTP client: {0}")]
    Client(#[from] GithubError),

    #[error("Failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] io::Error),
}

/// Rendered output plus whether the lookup succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

/// Looks up profiles, serving repeat lookups from the session cache
#[derive(Debug, Clone)]
pub struct ProfileService {
    client: GithubClient,
    cache: Option<CacheManager>,
    session_minutes: u64,
}

impl ProfileService {
    pub fn new(client: GithubClient, cache: Option<CacheManager>, session_minutes: u64) -> Self {
        Self {
            client,
            cache,
            session_minutes,
        }
    }

    /// Logins are case-insensitive on GitHub, so the key is too
    fn cache_key(username: &str) -> String {
        format!("profile_{}", username.to_lowercase())
    }

    /// Returns the profile for `username`
    ///
    /// # Behavior
    /// - A cache entry from the current session is returned as-is
    /// - Otherwise the profile is fetched and written to the cache
    /// - A failed cache write is logged and otherwise ignored
    pub async fn lookup(&self, username: &str) -> Result<Profile, LookupError> {
        let cache_key = Self::cache_key(username);

        if let Some(ref cache) = self.cache {
            match cache.read::<Profile>(&cache_key) {
                Some(cached) if !cached.is_expired => {
                    debug!(username, cached_at = %cached.cached_at, "cache hit");
                    return Ok(cached.data);
                }
                Some(_) => debug!(username, "cache entry from an earlier session"),
                None => debug!(username, "cache miss"),
            }
        }

        info!(username, api = self.client.base_url(), "fetching profile");
        let profile = self
            .client
            .fetch_profile(username)
            .await
            .map_err(LookupError::Unavailable)?;

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.write(&cache_key, &profile, self.session_minutes) {
                warn!(username, error = %e, "could not write profile to cache");
            }
        }

        Ok(profile)
    }
}

/// Runs the lookup described by `config` against the platform cache directory
pub async fn run(config: &StartupConfig) -> Result<Outcome, AppError> {
    run_with_cache(config, CacheManager::new()).await
}

/// Runs the lookup described by `config` using `cache` as the session store
///
/// `clear_cache` empties the store first, even when `use_cache` is off.
pub async fn run_with_cache(
    config: &StartupConfig,
    cache: Option<CacheManager>,
) -> Result<Outcome, AppError> {
    if config.clear_cache {
        if let Some(ref cache) = cache {
            let removed = cache.clear()?;
            info!(removed, "cleared session cache");
        }
    }

    let cache = cache.filter(|_| config.use_cache);
    let client = GithubClient::new(config.api_url.clone(), config.token.clone())?;
    let service = ProfileService::new(client, cache, config.session_minutes);

    execute(&service, config).await
}

/// Looks up `config.username` with `service` and renders the outcome
pub async fn execute(service: &ProfileService, config: &StartupConfig) -> Result<Outcome, AppError> {
    let Some(ref username) = config.username else {
        return Ok(Outcome {
            output: render_empty(config.format),
            success: true,
        });
    };

    match service.lookup(username).await {
        Ok(profile) => Ok(Outcome {
            output: render_profile(config.format, username, &profile)?,
            success: true,
        }),
        Err(LookupError::Unavailable(cause)) => {
            warn!(username = username.as_str(), error = %cause, "lookup failed");
            Ok(Outcome {
                output: render_failure(config.format, username)?,
                success: false,
            })
        }
    }
}

fn render_empty(format: OutputFormat) -> String {
    match format {
        OutputFormat::Html => ui::render_page(None, ""),
        OutputFormat::Fragment => String::new(),
        OutputFormat::Json => "null".to_string(),
    }
}

fn render_profile(format: OutputFormat, username: &str, profile: &Profile) -> Result<String, AppError> {
    Ok(match format {
        OutputFormat::Html => ui::render_page(Some(username), &ui::render_profile(profile)),
        OutputFormat::Fragment => ui::render_profile(profile),
        OutputFormat::Json => serde_json::to_string_pretty(profile)?,
    })
}

fn render_failure(format: OutputFormat, username: &str) -> Result<String, AppError> {
    Ok(match format {
        OutputFormat::Html => ui::render_page(Some(username), &ui::render_error()),
        OutputFormat::Fragment => ui::render_error(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&serde_json::json!({ "error": FETCH_ERROR_MESSAGE }))?
        }
    })
}
