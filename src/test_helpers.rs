//! Shared test utilities for the vitae test suite.
//!
//! Provides a populated sample content model, small record builders, and a
//! fixture writer that sets up a content directory in a temp dir.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let content = sample_content();
//! assert!(!content.is_empty_resume());
//!
//! let tmp = setup_content_dir();
//! let content = crate::content::load_content(tmp.path()).unwrap();
//! ```

use tempfile::TempDir;

use crate::content::{
    AchievementGroup, Article, Certification, Company, Contact, ContactLink, Content,
    EducationEntry, Hobby, Metric, Profile, Project, Role, SkillGroup,
};

// =========================================================================
// Sample content
// =========================================================================

/// A small but fully populated content model: every section has at least one
/// entry, so tests can exercise each renderer and the exporter end to end.
pub fn sample_content() -> Content {
    Content {
        profile: Profile {
            name: "Ada Lovelace".into(),
            headline: "Principal Engineer".into(),
            tagline: "I make analytical engines sing.".into(),
            location: "London".into(),
            summary: "Engineer with **deep** experience in symbolic computation.".into(),
        },
        experience: vec![Company {
            company: "Analytical Engines Ltd".into(),
            roles: vec![
                Role {
                    title: "Staff Engineer".into(),
                    period: "May 1842 - October 1843".into(),
                    description: "Programs for the difference engine".into(),
                    highlights: vec![
                        "Published the first computer program, with annotated walkthrough"
                            .into(),
                        "Cut punch-card waste by a third".into(),
                    ],
                },
                Role {
                    title: "Engineer".into(),
                    period: "1840 - 1842".into(),
                    description: String::new(),
                    highlights: vec!["Built the loop notation used by the whole team".into()],
                },
            ],
        }],
        achievements: vec![AchievementGroup {
            category: "Engine Efficiency".into(),
            metrics: vec![
                Metric {
                    label: "Punch-card waste cut".into(),
                    value: "33%".into(),
                },
                Metric {
                    label: "Programs published".into(),
                    value: "1".into(),
                },
            ],
        }],
        skills: vec![SkillGroup {
            category: "Languages".into(),
            items: vec!["Rust".into(), "Analytical Notation".into()],
        }],
        certifications: vec![Certification {
            name: "Certified Engine Operator".into(),
            issuer: "Royal Society".into(),
        }],
        education: vec![EducationEntry {
            degree: "Private Tuition".into(),
            field: "Mathematics".into(),
            institution: "De Morgan".into(),
            period: "1833 - 1841".into(),
        }],
        contact: Contact {
            email: Some("ada@example.com".into()),
            location: "London".into(),
            links: vec![ContactLink {
                label: "LinkedIn".into(),
                url: "https://www.linkedin.com/in/ada/".into(),
            }],
        },
        articles: vec![
            article_with_tags("Notes on the Analytical Engine", &["Computing", "Mathematics"]),
            article_with_tags("On Looping", &["Computing"]),
        ],
        projects: vec![Project {
            name: "Bernoulli".into(),
            tagline: "Number computation on punched cards".into(),
            description: "Computes Bernoulli numbers mechanically.".into(),
            technologies: vec!["Brass".into()],
            features: vec!["Loop support".into()],
            url: "https://github.com/ada/bernoulli".into(),
            live_url: None,
            category: "Tools".into(),
        }],
        hobbies: vec![Hobby {
            title: "Riding".into(),
            caption: "Ockham Park, 1835".into(),
            image: "assets/riding.jpg".into(),
        }],
    }
}

/// An article with the given title and tags; other fields get filler values.
pub fn article_with_tags(title: &str, tags: &[&str]) -> Article {
    Article {
        title: title.to_string(),
        excerpt: format!("Excerpt for {title}."),
        published: "1843-09-01".into(),
        read_minutes: 7,
        source: "Taylor's Scientific Memoirs".into(),
        url: format!("https://example.com/{}", crate::content::tag_slug(title)),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured: false,
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `sample_content` and a minimal `config.toml` into a temp directory
/// shaped like a real content dir.
pub fn setup_content_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let toml = toml::to_string_pretty(&sample_content()).unwrap();
    std::fs::write(tmp.path().join("content.toml"), toml).unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        "[site]\ntitle = \"Ada Lovelace\"\n",
    )
    .unwrap();
    tmp
}
