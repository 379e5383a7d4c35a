//! Shared types serialized between pipeline stages.
//!
//! The build writes a `manifest.json` to the temp directory before
//! generation. It is never required by a later run — each build is cheap
//! enough to redo from scratch — but a human-readable snapshot of exactly
//! what the generator consumed makes pipeline problems inspectable.

use crate::config::SiteConfig;
use crate::content::Content;
use crate::fetch::Repository;
use serde::{Deserialize, Serialize};

/// Outcome of the repository listing fetch, carried into generation.
///
/// The generator renders each state differently: cards for `Fetched`, a
/// static error panel for `Failed`, a short note for `Skipped`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepoListing {
    Fetched { repos: Vec<Repository> },
    Failed { message: String },
    Skipped,
}

impl RepoListing {
    pub fn repos(&self) -> &[Repository] {
        match self {
            RepoListing::Fetched { repos } => repos,
            _ => &[],
        }
    }
}

/// Everything the generate and export stages consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteManifest {
    pub content: Content,
    pub config: SiteConfig,
    pub repos: RepoListing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_content;

    #[test]
    fn manifest_roundtrips_through_json() {
        let manifest = SiteManifest {
            content: sample_content(),
            config: SiteConfig::default(),
            repos: RepoListing::Failed {
                message: "listing endpoint returned HTTP 500".into(),
            },
        };
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: SiteManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content.profile.name, manifest.content.profile.name);
        assert!(matches!(back.repos, RepoListing::Failed { .. }));
    }

    #[test]
    fn repos_accessor_empty_unless_fetched() {
        assert!(RepoListing::Skipped.repos().is_empty());
        assert!(
            RepoListing::Failed {
                message: "x".into()
            }
            .repos()
            .is_empty()
        );
    }
}
