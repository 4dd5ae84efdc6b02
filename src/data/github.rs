//! GitHub REST API client
//!
//! Fetches a user, their starred repositories and organizations, and folds the
//! three responses into a `Profile`. Calls are made one after another.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{Organization, Profile};

/// Default base URL for the GitHub API
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Errors that can occur when talking to the GitHub API
#[derive(Debug, Error)]
pub enum GithubError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Base URL could not be used to build a request URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// `GET /users/{username}` response, limited to the fields we use
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub blog: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub public_gists: u64,
    pub created_at: DateTime<Utc>,
    /// URI template, e.g. `.../starred{/owner}{/repo}`
    pub starred_url: String,
    pub organizations_url: String,
}

#[derive(Debug, Deserialize)]
struct OrgResponse {
    login: String,
    avatar_url: String,
}

/// Client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Creates a client for the API at `base_url`, optionally authenticated
    /// with a bearer token
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http_client = Client::builder()
            .user_agent(concat!("ghcard/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/users/{username}`, percent-encoding the username
    fn user_url(&self, username: &str) -> Result<Url, GithubError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| GithubError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["users", username]);
        Ok(url)
    }

    /// Whether `url` has the same scheme, host and port as the base URL
    fn is_api_origin(&self, url: &str) -> bool {
        match (Url::parse(&self.base_url), Url::parse(url)) {
            (Ok(base), Ok(target)) => base.origin() == target.origin(),
            _ => false,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GithubError> {
        debug!(url, "GET");
        let mut request = self.http_client.get(url);
        if let Some(ref token) = self.token {
            // Follow-up URLs come from response bodies; only the API host sees the token
            if self.is_api_origin(url) {
                request = request.bearer_auth(token);
            } else {
                debug!(url, "not sending token to foreign origin");
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches the user record
    pub async fn fetch_user(&self, username: &str) -> Result<UserResponse, GithubError> {
        let url = self.user_url(username)?;
        self.get_json(url.as_str()).await
    }

    /// Counts the entries on the first page of the starred list
    ///
    /// # Arguments
    /// * `starred_url` - The `starred_url` template from the user record
    pub async fn fetch_stars(&self, starred_url: &str) -> Result<u64, GithubError> {
        let url = strip_url_template(starred_url);
        let starred: Vec<serde_json::Value> = self.get_json(&url).await?;
        Ok(starred.len() as u64)
    }

    /// Fetches the user's public organizations
    pub async fn fetch_organizations(&self, url: &str) -> Result<Vec<Organization>, GithubError> {
        let orgs: Vec<OrgResponse> = self.get_json(url).await?;
        Ok(orgs
            .into_iter()
            .map(|org| Organization::from_login(&org.login, org.avatar_url))
            .collect())
    }

    /// Fetches everything needed to render a profile
    ///
    /// Only a failed user request fails the lookup. Stars and organizations
    /// are extras: if either request fails it is logged and left empty.
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, GithubError> {
        let user = self.fetch_user(username).await?;

        let stars = match self.fetch_stars(&user.starred_url).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(username, error = %e, "could not fetch starred repositories");
                None
            }
        };

        let orgs = match self.fetch_organizations(&user.organizations_url).await {
            Ok(orgs) => orgs,
            Err(e) => {
                warn!(username, error = %e, "could not fetch organizations");
                Vec::new()
            }
        };

        Ok(build_profile(user, stars, orgs))
    }
}

/// Folds the API responses into a `Profile`
pub fn build_profile(user: UserResponse, stars: Option<u64>, orgs: Vec<Organization>) -> Profile {
    Profile {
        avatar_url: user.avatar_url,
        user_url: user.html_url,
        website_url: user.blog.as_deref().and_then(normalize_website),
        name: user.name,
        username: user.login,
        bio: user.bio,
        followers: user.followers,
        following: user.following,
        repos: user.public_repos,
        gists: user.public_gists,
        location: user.location,
        company: user.company,
        email: user.email,
        created_at: format_join_date(user.created_at),
        stars,
        orgs,
    }
}

/// Turns a user-entered website into a link target
///
/// GitHub stores `blog` verbatim, so `github.blog` and `https://github.blog`
/// are both common. Bare hosts get `https://`; anything that is not an
/// http(s) URL after that (`javascript:`, `mailto:`, blank) yields `None`.
pub fn normalize_website(blog: &str) -> Option<String> {
    let blog = blog.trim();
    if blog.is_empty() {
        return None;
    }

    let candidate = if blog.contains("://") {
        blog.to_string()
    } else {
        // A colon before the path is either a port or a scheme
        let authority = blog.split(['/', '?', '#']).next().unwrap_or_default();
        if let Some((_, port)) = authority.split_once(':') {
            if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
        }
        format!("https://{}", blog)
    };

    let url = Url::parse(&candidate).ok()?;
    if matches!(url.scheme(), "http" | "https") && url.host().is_some() {
        Some(candidate)
    } else {
        None
    }
}

/// Formats a timestamp as the UTC calendar date, e.g. `25 Jan 2011`
pub fn format_join_date(created_at: DateTime<Utc>) -> String {
    created_at.format("%d %b %Y").to_string()
}

/// Removes a URI template suffix: everything from the first `{` to the last `}`
///
/// `https://api.github.com/users/octocat/starred{/owner}{/repo}` becomes
/// `https://api.github.com/users/octocat/starred`.
pub fn strip_url_template(url: &str) -> String {
    match (url.find('{'), url.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}", &url[..start], &url[end + 1..])
        }
        _ => url.to_string(),
    }
}
