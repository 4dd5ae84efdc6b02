//! Core data models for ghcard
//!
//! `Profile` is the flat record assembled from the GitHub API and stored in the
//! session cache; the renderers only ever see this type.

pub mod github;

pub use github::{
    format_join_date, normalize_website, strip_url_template, GithubClient, GithubError,
};

use serde::{Deserialize, Serialize};

/// Base URL for organization pages on github.com
pub const GITHUB_WEB_URL: &str = "https://github.com/";

/// A developer profile ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub avatar_url: String,
    /// Link to the profile page on github.com
    pub user_url: String,
    /// The user's blog/website as an absolute http(s) URL, if any
    pub website_url: Option<String>,
    pub name: Option<String>,
    /// The login
    pub username: String,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    /// Number of public repositories
    pub repos: u64,
    /// Number of public gists
    pub gists: u64,
    pub location: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    /// Account creation date, e.g. `25 Jan 2011`
    pub created_at: String,
    /// Starred repositories on the first page of the starred list; `None` if
    /// that request failed
    pub stars: Option<u64>,
    pub orgs: Vec<Organization>,
}

impl Profile {
    /// Name to display, falling back to the login when the user set none
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

/// An organization the user publicly belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub avatar_url: String,
    /// Link to the organization page on github.com
    pub org_url: String,
}

impl Organization {
    pub fn from_login(login: &str, avatar_url: impl Into<String>) -> Self {
        Self {
            avatar_url: avatar_url.into(),
            org_url: format!("{}{}", GITHUB_WEB_URL, login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            avatar_url: "https://avatars.example/u/1".to_string(),
            user_url: "https://github.com/octocat".to_string(),
            website_url: None,
            name: None,
            username: "octocat".to_string(),
            bio: None,
            followers: 1,
            following: 2,
            repos: 3,
            gists: 4,
            location: None,
            company: None,
            email: None,
            created_at: "25 Jan 2011".to_string(),
            stars: Some(5),
            orgs: Vec::new(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let mut p = profile();
        assert_eq!(p.display_name(), "octocat");

        p.name = Some("The Octocat".to_string());
        assert_eq!(p.display_name(), "The Octocat");
    }

    #[test]
    fn test_organization_url_points_at_github() {
        let org = Organization::from_login("rust-lang", "https://avatars.example/o/5430905");
        assert_eq!(org.org_url, "https://github.com/rust-lang");
        assert_eq!(org.avatar_url, "https://avatars.example/o/5430905");
    }

    #[test]
    fn test_profile_survives_json_cache_format() {
        let p = profile();
        let json = serde_json::to_string(&p).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
