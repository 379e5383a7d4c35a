//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (company, role, article, repository) is its semantic
//! identity, with counts and secondary details shown as indented context
//! lines. This makes the output readable as a content inventory.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Profile
//!     Ada Lovelace (Principal Engineer)
//! Experience
//!     001 Analytical Engines Ltd (2 roles)
//! Sections
//!     achievements: 1
//!     skills: 1 group
//!     certifications: 1
//!     education: 1
//!     articles: 2 (2 tags)
//!     projects: 1
//!     hobbies: 1
//! ```
//!
//! ## Fetch
//!
//! ```text
//! Repositories (3)
//!     001 bernoulli-cli (Rust, 3 stars)
//! ```
//!
//! ## Export
//!
//! ```text
//! Exported resume.pdf (2 pages, 14 KB)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::content::{self, Content};
use crate::types::RepoListing;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count_line(label: &str, n: usize) -> String {
    format!("{}{}: {}", indent(1), label, n)
}

// ============================================================================
// Load output
// ============================================================================

/// Format the content summary after loading.
pub fn format_load_output(content: &Content) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Profile".to_string());
    let headline = if content.profile.headline.is_empty() {
        content.profile.name.clone()
    } else {
        format!("{} ({})", content.profile.name, content.profile.headline)
    };
    lines.push(format!("{}{}", indent(1), headline));

    if !content.experience.is_empty() {
        lines.push("Experience".to_string());
        for (idx, company) in content.experience.iter().enumerate() {
            let roles = company.roles.len();
            let noun = if roles == 1 { "role" } else { "roles" };
            lines.push(format!(
                "{}{} {} ({} {})",
                indent(1),
                format_index(idx + 1),
                company.company,
                roles,
                noun
            ));
        }
    }

    lines.push("Sections".to_string());
    lines.push(count_line("achievements", content.achievements.len()));
    lines.push(count_line("skills", content.skills.len()));
    lines.push(count_line("certifications", content.certifications.len()));
    lines.push(count_line("education", content.education.len()));
    let tag_count = content::all_tags(&content.articles).len();
    lines.push(format!(
        "{}articles: {} ({} tags)",
        indent(1),
        content.articles.len(),
        tag_count
    ));
    lines.push(count_line("projects", content.projects.len()));
    lines.push(count_line("hobbies", content.hobbies.len()));

    lines
}

pub fn print_load_output(content: &Content) {
    for line in format_load_output(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Fetch output
// ============================================================================

/// Format the repository listing outcome.
pub fn format_fetch_output(listing: &RepoListing) -> Vec<String> {
    match listing {
        RepoListing::Fetched { repos } => {
            let mut lines = vec![format!("Repositories ({})", repos.len())];
            for (idx, repo) in repos.iter().enumerate() {
                let language = repo.language.as_deref().unwrap_or("unknown");
                lines.push(format!(
                    "{}{} {} ({}, {} stars)",
                    indent(1),
                    format_index(idx + 1),
                    repo.name,
                    language,
                    repo.stargazers_count
                ));
            }
            lines
        }
        RepoListing::Failed { message } => vec![
            "Repository listing failed".to_string(),
            format!("{}{}", indent(1), message),
        ],
        RepoListing::Skipped => vec!["Repository listing skipped".to_string()],
    }
}

pub fn print_fetch_output(listing: &RepoListing) {
    for line in format_fetch_output(listing) {
        println!("{}", line);
    }
}

// ============================================================================
// Export output
// ============================================================================

/// Format the export summary line.
pub fn format_export_output(filename: &str, page_count: usize, bytes: usize) -> Vec<String> {
    let noun = if page_count == 1 { "page" } else { "pages" };
    vec![format!(
        "Exported {} ({} {}, {} KB)",
        filename,
        page_count,
        noun,
        bytes.div_ceil(1024)
    )]
}

pub fn print_export_output(filename: &str, page_count: usize, bytes: usize) {
    for line in format_export_output(filename, page_count, bytes) {
        println!("{}", line);
    }
}
