//! Résumé content loading and the tag filter.
//!
//! Stage 1 of the vitae build pipeline. All site content — profile, work
//! history, skills, articles, featured projects, hobbies — lives in a single
//! `content.toml` in the content directory. The file is the data source;
//! editing content never touches code.
//!
//! ## Content records
//!
//! Every record is a flat, immutable value object: it is defined once in the
//! TOML file and rendered verbatim by the generate and export stages. There is
//! no creation/update path and no identity beyond display fields.
//!
//! ```toml
//! [profile]
//! name = "Ada Lovelace"
//! headline = "Principal Engineer"
//!
//! [[experience]]
//! company = "Analytical Engines Ltd"
//!
//! [[experience.roles]]
//! title = "Staff Engineer"
//! period = "1842 - 1843"
//! highlights = ["Wrote the first published program"]
//!
//! [[articles]]
//! title = "Notes on the Analytical Engine"
//! url = "https://example.com/notes"
//! tags = ["Computing", "Mathematics"]
//! ```
//!
//! Unknown keys are rejected to catch typos early, matching the config loader.
//!
//! ## Validation
//!
//! [`Content::validate`] checks presence rules only: a profile name exists,
//! every company has at least one role, every article has a title and URL.
//! There is no deeper integrity checking — content is trusted input.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("content.toml not found in {0}")]
    Missing(PathBuf),
    #[error("Content validation error: {0}")]
    Validation(String),
}

/// The full content model, deserialized from `content.toml`.
///
/// Sections the file omits default to empty; the generator skips empty
/// sections rather than rendering placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Content {
    pub profile: Profile,
    pub experience: Vec<Company>,
    pub achievements: Vec<AchievementGroup>,
    pub skills: Vec<SkillGroup>,
    pub certifications: Vec<Certification>,
    pub education: Vec<EducationEntry>,
    pub contact: Contact,
    pub articles: Vec<Article>,
    pub projects: Vec<Project>,
    pub hobbies: Vec<Hobby>,
}

/// Identity block rendered in the hero section and the PDF header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// Short role line, e.g. "Senior Engineering Manager".
    pub headline: String,
    /// One-sentence hook shown under the headline.
    pub tagline: String,
    pub location: String,
    /// About/summary text, markdown on the site, plain text in the PDF.
    pub summary: String,
}

/// An employer with one or more roles held there, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Company {
    pub company: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Role {
    pub title: String,
    /// Free-text date range, e.g. "May 2022 - October 2023".
    pub period: String,
    pub description: String,
    pub highlights: Vec<String>,
}

/// A categorized group of headline metrics, e.g. "Business Impact" with
/// "Cost Savings Delivered" = "$15M+". Rendered as cards on the index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AchievementGroup {
    pub category: String,
    pub metrics: Vec<Metric>,
}

/// One headline figure inside an achievement group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// A named skill category with its items, e.g. "Languages" → ["Rust", "Go"].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub period: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contact {
    pub email: Option<String>,
    pub location: String,
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

/// A published article or post, linked out to its source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Article {
    pub title: String,
    pub excerpt: String,
    /// ISO date string, display-only.
    pub published: String,
    pub read_minutes: u32,
    /// Where it was published, e.g. "Medium".
    pub source: String,
    pub url: String,
    pub tags: Vec<String>,
    pub featured: bool,
}

/// A hand-picked project shown above the fetched repository listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub url: String,
    pub live_url: Option<String>,
    pub category: String,
}

/// A hobby photo card: image paths are fixed relative paths under `assets/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hobby {
    pub title: String,
    pub caption: String,
    pub image: String,
}

impl Content {
    /// Presence validation. Content is trusted; this only catches files that
    /// would render as visibly broken pages.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.profile.name.trim().is_empty() {
            return Err(ContentError::Validation(
                "profile.name must not be empty".into(),
            ));
        }
        for company in &self.experience {
            if company.roles.is_empty() {
                return Err(ContentError::Validation(format!(
                    "company \"{}\" has no roles",
                    company.company
                )));
            }
        }
        for article in &self.articles {
            if article.title.trim().is_empty() || article.url.trim().is_empty() {
                return Err(ContentError::Validation(
                    "every article needs a title and a url".into(),
                ));
            }
        }
        Ok(())
    }

    /// True when there is nothing to lay out in the résumé PDF.
    ///
    /// The exporter refuses to run against this rather than emitting an
    /// empty document.
    pub fn is_empty_resume(&self) -> bool {
        self.profile.name.trim().is_empty()
            || (self.experience.is_empty()
                && self.skills.is_empty()
                && self.certifications.is_empty()
                && self.education.is_empty())
    }
}

/// Load and validate `content.toml` from the content directory.
pub fn load_content(dir: &Path) -> Result<Content, ContentError> {
    let path = dir.join("content.toml");
    if !path.exists() {
        return Err(ContentError::Missing(dir.to_path_buf()));
    }
    let raw = fs::read_to_string(&path)?;
    let content: Content = toml::from_str(&raw)?;
    content.validate()?;
    Ok(content)
}

// =============================================================================
// Tag filter
// =============================================================================

/// Filter articles by tag.
///
/// Pure function of `(articles, tag)`:
/// - `None` returns every article, in order.
/// - `Some(t)` returns the subsequence whose tag set contains `t`.
/// - A tag no article carries yields an empty result, not an error.
pub fn filter_by_tag<'a>(articles: &'a [Article], tag: Option<&str>) -> Vec<&'a Article> {
    match tag {
        None => articles.iter().collect(),
        Some(t) => articles
            .iter()
            .filter(|a| a.tags.iter().any(|candidate| candidate == t))
            .collect(),
    }
}

/// All distinct tags across the article list, in first-seen order.
///
/// Drives the set of per-tag pages the generator emits, so an unknown tag can
/// never produce a page.
pub fn all_tags(articles: &[Article]) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::new();
    for article in articles {
        for tag in &article.tags {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
    }
    tags
}

/// URL slug for a tag page: lowercase, runs of non-alphanumerics collapsed
/// to single dashes.
pub fn tag_slug(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    let mut last_dash = true;
    for c in tag.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Returns a starter `content.toml` skeleton with one entry per section.
///
/// Used by the `gen-content` CLI command.
pub fn stock_content_toml() -> &'static str {
    r##"# vitae content file
# ==================
# Everything the site shows lives here. Sections you leave out are simply
# not rendered. Unknown keys are an error.

[profile]
name = "Your Name"
headline = "Your Role"
tagline = "One sentence about what you do."
location = "Your City"
summary = """
A short **markdown** paragraph about you. Shown in the About section and,
as plain text, at the top of the exported PDF.
"""

[contact]
email = "you@example.com"
location = "Your City"

[[contact.links]]
label = "LinkedIn"
url = "https://www.linkedin.com/in/you/"

[[experience]]
company = "Example Corp"

[[experience.roles]]
title = "Senior Engineer"
period = "2022 - Present"
description = "What the role is about, in one line."
highlights = [
    "A concrete, measurable achievement",
    "Another one",
]

[[achievements]]
category = "Business Impact"

[[achievements.metrics]]
label = "Cost Savings Delivered"
value = "$1M+"

[[achievements.metrics]]
label = "Production Uptime"
value = "99.9%"

[[skills]]
category = "Languages"
items = ["Rust", "TypeScript", "Python"]

[[certifications]]
name = "Example Certification"
issuer = "Example Issuer"

[[education]]
degree = "Bachelor's Degree"
field = "Computer Science"
institution = "Example University"
period = "2010 - 2014"

[[articles]]
title = "An Article You Wrote"
excerpt = "One or two sentences on what it covers."
published = "2024-01-15"
read_minutes = 6
source = "Medium"
url = "https://example.com/article"
tags = ["Engineering"]
featured = true

[[projects]]
name = "A Project"
tagline = "What it is in five words"
description = "A paragraph on what it does and why it exists."
technologies = ["Rust"]
features = ["Something it does well"]
url = "https://github.com/you/project"
category = "Tools"

[[hobbies]]
title = "Photography"
caption = "Where and when"
image = "assets/hobby.jpg"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{article_with_tags, sample_content};
    use tempfile::TempDir;

    #[test]
    fn stock_content_parses_and_validates() {
        let content: Content = toml::from_str(stock_content_toml()).unwrap();
        content.validate().unwrap();
        assert_eq!(content.profile.name, "Your Name");
        assert_eq!(content.experience.len(), 1);
        assert_eq!(content.experience[0].roles.len(), 1);
    }

    #[test]
    fn achievements_parse_categories_and_metrics() {
        let content: Content = toml::from_str(
            r#"
[profile]
name = "Ada"

[[achievements]]
category = "Engine Efficiency"

[[achievements.metrics]]
label = "Punch-card waste cut"
value = "33%"
"#,
        )
        .unwrap();
        assert_eq!(content.achievements.len(), 1);
        assert_eq!(content.achievements[0].category, "Engine Efficiency");
        assert_eq!(content.achievements[0].metrics[0].value, "33%");
    }

    #[test]
    fn achievements_default_to_empty() {
        let content: Content = toml::from_str("[profile]\nname = \"Ada\"\n").unwrap();
        assert!(content.achievements.is_empty());
    }

    #[test]
    fn load_content_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("content.toml"), stock_content_toml()).unwrap();
        let content = load_content(tmp.path()).unwrap();
        assert_eq!(content.skills[0].category, "Languages");
    }

    #[test]
    fn sample_content_roundtrips_through_directory() {
        let tmp = crate::test_helpers::setup_content_dir();
        let content = load_content(tmp.path()).unwrap();
        assert_eq!(content.profile.name, "Ada Lovelace");
        assert_eq!(content.experience[0].roles.len(), 2);
        assert_eq!(content.articles.len(), 2);
    }

    #[test]
    fn load_content_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_content(tmp.path());
        assert!(matches!(result, Err(ContentError::Missing(_))));
    }

    #[test]
    fn load_content_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("content.toml"), "not toml [[[").unwrap();
        assert!(matches!(
            load_content(tmp.path()),
            Err(ContentError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<Content, _> = toml::from_str(
            r#"
[profile]
nmae = "typo"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn validate_requires_name() {
        let mut content = sample_content();
        content.profile.name = "  ".into();
        let err = content.validate().unwrap_err();
        assert!(err.to_string().contains("profile.name"));
    }

    #[test]
    fn validate_rejects_company_without_roles() {
        let mut content = sample_content();
        content.experience.push(Company {
            company: "Ghost Corp".into(),
            roles: vec![],
        });
        let err = content.validate().unwrap_err();
        assert!(err.to_string().contains("Ghost Corp"));
    }

    #[test]
    fn validate_rejects_article_without_url() {
        let mut content = sample_content();
        content.articles.push(Article {
            title: "No link".into(),
            ..Article::default()
        });
        assert!(content.validate().is_err());
    }

    #[test]
    fn empty_resume_detection() {
        let content = Content::default();
        assert!(content.is_empty_resume());

        let with_name_only = Content {
            profile: Profile {
                name: "Someone".into(),
                ..Profile::default()
            },
            ..Content::default()
        };
        // A name with no body sections is still nothing to export.
        assert!(with_name_only.is_empty_resume());

        assert!(!sample_content().is_empty_resume());
    }

    // =========================================================================
    // Tag filter tests
    // =========================================================================

    #[test]
    fn filter_none_returns_all_in_order() {
        let articles = vec![
            article_with_tags("a", &["Testing"]),
            article_with_tags("b", &["AI"]),
            article_with_tags("c", &[]),
        ];
        let filtered = filter_by_tag(&articles, None);
        let titles: Vec<_> = filtered.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn filter_returns_exact_subsequence() {
        let articles = vec![
            article_with_tags("a", &["Testing", "DevOps"]),
            article_with_tags("b", &["AI"]),
            article_with_tags("c", &["Testing"]),
        ];
        let filtered = filter_by_tag(&articles, Some("Testing"));
        let titles: Vec<_> = filtered.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn filter_unknown_tag_is_empty_not_error() {
        let articles = vec![article_with_tags("a", &["Testing"])];
        assert!(filter_by_tag(&articles, Some("Knitting")).is_empty());
    }

    #[test]
    fn filter_is_case_sensitive_exact_match() {
        let articles = vec![article_with_tags("a", &["Testing"])];
        assert!(filter_by_tag(&articles, Some("testing")).is_empty());
    }

    #[test]
    fn filter_on_empty_list() {
        let articles: Vec<Article> = vec![];
        assert!(filter_by_tag(&articles, None).is_empty());
        assert!(filter_by_tag(&articles, Some("anything")).is_empty());
    }

    #[test]
    fn all_tags_unique_first_seen_order() {
        let articles = vec![
            article_with_tags("a", &["Testing", "DevOps"]),
            article_with_tags("b", &["AI", "Testing"]),
        ];
        assert_eq!(all_tags(&articles), vec!["Testing", "DevOps", "AI"]);
    }

    #[test]
    fn tag_slugs() {
        assert_eq!(tag_slug("Quality Engineering"), "quality-engineering");
        assert_eq!(tag_slug("a11y"), "a11y");
        assert_eq!(tag_slug("AI/ML & Security"), "ai-ml-security");
        assert_eq!(tag_slug("--weird--"), "weird");
    }
}
