//! Public repository listing fetch.
//!
//! Stage 2 of the build pipeline. Issues one unauthenticated GET to the
//! GitHub repository-listing endpoint for the configured user and filters out
//! denylisted repository names. The response is a sequence of flat JSON
//! records, consumed read-only.
//!
//! ## Failure semantics
//!
//! Deliberately minimal: no retry, no timeout configuration beyond the HTTP
//! client's defaults, no pagination, no partial results. A failed fetch is
//! terminal for the community page — the generator renders a static error
//! panel in place of the repository cards, and the next build tries again.

use crate::config::GithubConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("listing endpoint returned HTTP {0}")]
    Status(u16),
}

/// One public repository from the listing endpoint.
///
/// Only the fields the community page renders; everything else in the
/// response is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
}

/// The listing URL for a configured user.
///
/// One request, newest-first, at the endpoint's maximum page size — there is
/// no pagination handling by design.
pub fn listing_url(config: &GithubConfig) -> String {
    format!(
        "{}/users/{}/repos?sort=updated&per_page=100",
        config.api_root.trim_end_matches('/'),
        config.user
    )
}

/// Drop repositories whose name appears in the denylist (exact match).
///
/// Order of the remaining repositories is preserved.
pub fn exclude_denylisted(repos: Vec<Repository>, denylist: &[String]) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| !denylist.iter().any(|name| name == &repo.name))
        .collect()
}

/// Fetch the public repository listing and apply the denylist.
///
/// GitHub rejects requests without a User-Agent, so the client always sends
/// one identifying this tool.
pub fn fetch_repositories(config: &GithubConfig) -> Result<Vec<Repository>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("vitae/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(listing_url(config)).send()?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    let repos: Vec<Repository> = response.json()?;
    Ok(exclude_denylisted(repos, &config.exclude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// One-shot HTTP server on a loopback port. Reads the request, answers
    /// with the given status line and body, and closes the connection.
    fn stub_listing_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        (format!("http://{addr}"), handle)
    }

    fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/user/{name}"),
            homepage: None,
            language: Some("Rust".to_string()),
            stargazers_count: 0,
            forks_count: 0,
            topics: vec![],
            pushed_at: None,
        }
    }

    #[test]
    fn listing_url_shape() {
        let config = GithubConfig {
            user: "octocat".into(),
            ..GithubConfig::default()
        };
        assert_eq!(
            listing_url(&config),
            "https://api.github.com/users/octocat/repos?sort=updated&per_page=100"
        );
    }

    #[test]
    fn listing_url_trims_trailing_slash() {
        let config = GithubConfig {
            user: "octocat".into(),
            api_root: "http://127.0.0.1:9999/".into(),
            ..GithubConfig::default()
        };
        assert_eq!(
            listing_url(&config),
            "http://127.0.0.1:9999/users/octocat/repos?sort=updated&per_page=100"
        );
    }

    #[test]
    fn denylist_excludes_exact_names() {
        let repos = vec![repo("keeper"), repo("my-resume"), repo("other")];
        let deny = vec!["my-resume".to_string()];
        let kept = exclude_denylisted(repos, &deny);
        let names: Vec<_> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["keeper", "other"]);
    }

    #[test]
    fn denylist_is_exact_not_substring() {
        let repos = vec![repo("my-resume-v2")];
        let deny = vec!["my-resume".to_string()];
        assert_eq!(exclude_denylisted(repos, &deny).len(), 1);
    }

    #[test]
    fn empty_denylist_keeps_everything() {
        let repos = vec![repo("a"), repo("b")];
        assert_eq!(exclude_denylisted(repos, &[]).len(), 2);
    }

    #[test]
    fn repository_deserializes_from_listing_json() {
        // Shape of a record as the endpoint actually returns it — extra
        // fields must be ignored, absent optional fields tolerated.
        let json = r#"{
            "id": 12345,
            "name": "voice-guard",
            "full_name": "user/voice-guard",
            "description": "Speech emotion detection",
            "html_url": "https://github.com/user/voice-guard",
            "homepage": null,
            "language": "Python",
            "stargazers_count": 7,
            "forks_count": 2,
            "topics": ["ai", "audio"],
            "pushed_at": "2024-06-01T10:00:00Z",
            "open_issues_count": 1,
            "size": 2048
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "voice-guard");
        assert_eq!(repo.language.as_deref(), Some("Python"));
        assert_eq!(repo.stargazers_count, 7);
        assert_eq!(repo.topics, vec!["ai", "audio"]);
        assert!(repo.homepage.is_none());
    }

    #[test]
    fn repository_tolerates_minimal_record() {
        let json = r#"{"name": "x", "html_url": "https://github.com/u/x"}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert!(repo.topics.is_empty());
        assert!(repo.description.is_none());
    }

    #[test]
    fn fetch_against_unroutable_endpoint_is_http_error() {
        // No listener on this port; exercises the error path without the
        // network.
        let config = GithubConfig {
            user: "nobody".into(),
            api_root: "http://127.0.0.1:1".into(),
            ..GithubConfig::default()
        };
        let result = fetch_repositories(&config);
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[test]
    fn non_success_status_maps_to_status_error() {
        let (api_root, server) = stub_listing_server("500 Internal Server Error", "{}");
        let config = GithubConfig {
            user: "octocat".into(),
            api_root,
            ..GithubConfig::default()
        };
        let result = fetch_repositories(&config);
        assert!(matches!(result, Err(FetchError::Status(500))));
        server.join().unwrap();
    }

    #[test]
    fn successful_fetch_applies_denylist_to_response() {
        let body = r#"[
            {"name": "keeper", "html_url": "https://github.com/u/keeper"},
            {"name": "my-resume", "html_url": "https://github.com/u/my-resume"}
        ]"#;
        let (api_root, server) = stub_listing_server("200 OK", body);
        let config = GithubConfig {
            user: "octocat".into(),
            exclude: vec!["my-resume".to_string()],
            api_root,
        };
        let repos = fetch_repositories(&config).unwrap();
        server.join().unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["keeper"]);
    }
}
