//! Résumé PDF export.
//!
//! Stage 4 of the build pipeline. Lays the résumé sections of the content
//! model onto fixed-size pages with [`compose::Composer`], then hands the
//! positioned pages to a [`DocumentGenerator`] for encoding. The generator is
//! a trait so layout tests can run against a fake that records calls instead
//! of producing PDF bytes; [`pdf::LopdfGenerator`] is the real backend.
//!
//! Section order is fixed: header, Summary, Experience, Skills,
//! Certifications, Education. Empty sections are skipped entirely.

pub mod compose;
pub mod metrics;
pub mod pdf;
pub mod wrap;

use crate::config::SiteConfig;
use crate::content::Content;
use compose::{Composer, PageLayout};
use metrics::Font;
use pulldown_cmark::{Event, Parser, TagEnd};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("résumé content is empty; nothing to export")]
    EmptyDocument,
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document-level metadata handed to the generator alongside the pages.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub author: String,
    pub page_width: f32,
    pub page_height: f32,
}

/// Encodes positioned pages into a finished document.
pub trait DocumentGenerator {
    fn render(&self, pages: &[PageLayout], meta: &DocumentMeta) -> Result<Vec<u8>, ExportError>;
}

/// Flatten markdown to plain text for PDF rendering.
///
/// The site renders `profile.summary` as markdown; the PDF shows the same
/// text with emphasis markers and link targets stripped.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::Heading(_)) => out.push(' '),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn contact_line(content: &Content) -> String {
    let mut parts: Vec<String> = Vec::new();
    let location = if content.profile.location.is_empty() {
        &content.contact.location
    } else {
        &content.profile.location
    };
    if !location.is_empty() {
        parts.push(location.clone());
    }
    if let Some(email) = &content.contact.email {
        if !email.is_empty() {
            parts.push(email.clone());
        }
    }
    for link in &content.contact.links {
        parts.push(link.url.clone());
    }
    parts.join("  \u{2022}  ")
}

/// Lay out the résumé onto pages. Pure function of content and config.
pub fn layout_resume(content: &Content, config: &SiteConfig) -> Vec<PageLayout> {
    let mut c = Composer::new(&config.pdf);
    let body = c.body_size();

    c.text_line(&content.profile.name, Font::Bold, c.heading_size() + 5.0);
    if !content.profile.headline.is_empty() {
        c.text_line(&content.profile.headline, Font::Oblique, body + 1.0);
    }
    let contact = contact_line(content);
    if !contact.is_empty() {
        c.text_line(&contact, Font::Regular, body);
    }

    let summary = plain_text(&content.profile.summary);
    if !summary.is_empty() {
        c.gap(10.0);
        c.section_heading("Summary");
        c.paragraph(&summary, Font::Regular);
    }

    if !content.experience.is_empty() {
        c.gap(12.0);
        c.section_heading("Experience");
        for company in &content.experience {
            for role in &company.roles {
                c.entry_header(&role.title, &role.period);
                let subtitle = if role.description.is_empty() {
                    company.company.clone()
                } else {
                    format!("{} \u{2014} {}", company.company, role.description)
                };
                c.subtitle(&subtitle);
                for highlight in &role.highlights {
                    c.bullet(highlight);
                }
                c.gap(6.0);
            }
        }
    }

    if !content.skills.is_empty() {
        c.gap(6.0);
        c.section_heading("Skills");
        for group in &content.skills {
            c.bullet(&format!("{}: {}", group.category, group.items.join(", ")));
        }
    }

    if !content.certifications.is_empty() {
        c.gap(12.0);
        c.section_heading("Certifications");
        for cert in &content.certifications {
            c.bullet(&format!("{} \u{2014} {}", cert.name, cert.issuer));
        }
    }

    if !content.education.is_empty() {
        c.gap(12.0);
        c.section_heading("Education");
        for entry in &content.education {
            let degree = if entry.field.is_empty() {
                entry.degree.clone()
            } else {
                format!("{}, {}", entry.degree, entry.field)
            };
            c.entry_header(&degree, &entry.period);
            c.subtitle(&entry.institution);
            c.gap(4.0);
        }
    }

    c.finish(&config.site.attribution)
}

/// Export the résumé as a finished document.
///
/// The empty check runs before the generator is invoked: an empty content
/// model produces [`ExportError::EmptyDocument`] and no generator call.
pub fn export_resume(
    content: &Content,
    config: &SiteConfig,
    generator: &dyn DocumentGenerator,
) -> Result<Vec<u8>, ExportError> {
    if content.is_empty_resume() {
        return Err(ExportError::EmptyDocument);
    }
    let pages = layout_resume(content, config);
    let meta = DocumentMeta {
        title: format!("{} \u{2014} R\u{e9}sum\u{e9}", content.profile.name),
        author: content.profile.name.clone(),
        page_width: config.pdf.page_width,
        page_height: config.pdf.page_height,
    };
    generator.render(&pages, &meta)
}
