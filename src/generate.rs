//! HTML site generation.
//!
//! Stage 3 of the vitae build pipeline. Takes the site manifest written by
//! the earlier stages and generates the final static HTML site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): hero, about, key achievements,
//!   experience timeline, skills, certifications, education, and contact
//!   sections
//! - **Articles** (`/articles/index.html`): every article, plus one filtered
//!   page per tag (`/articles/{slug}.html`)
//! - **Community** (`/community.html`): featured projects and the fetched
//!   repository listing (or its failure panel)
//! - **Hobbies** (`/hobbies.html`): photo cards
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── community.html
//! ├── hobbies.html
//! ├── resume.pdf            # written by the export stage
//! ├── articles/
//! │   ├── index.html        # all articles
//! │   └── testing.html      # one page per tag
//! └── assets/               # copied from the content directory
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (colors and theme injected from config)
//! - `static/nav.js`: scroll-spy for the index page section nav
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::content::{self, Article, Content, Hobby, Project};
use crate::fetch::Repository;
use crate::types::{RepoListing, SiteManifest};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

pub fn generate(
    manifest_path: &Path,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: SiteManifest = serde_json::from_str(&manifest_content)?;

    // Generate CSS with colors and theme from config
    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        config::generate_theme_css(&manifest.config.theme),
        CSS_STATIC
    );

    fs::create_dir_all(output_dir)?;

    // Copy content assets (hobby photos etc.) to output
    let assets_dir = content_dir.join("assets");
    if assets_dir.is_dir() {
        copy_dir_recursive(&assets_dir, &output_dir.join("assets"))?;
    }

    // Generate index page
    let index_html = render_index(&manifest, &css);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    println!("Generated index.html");

    // Generate article pages: the full list plus one page per tag
    let articles_dir = output_dir.join("articles");
    fs::create_dir_all(&articles_dir)?;

    let all_html = render_articles_page(&manifest, None, &css);
    fs::write(articles_dir.join("index.html"), all_html.into_string())?;
    println!("Generated articles/index.html");

    for tag in content::all_tags(&manifest.content.articles) {
        let slug = content::tag_slug(tag);
        let tag_html = render_articles_page(&manifest, Some(tag), &css);
        fs::write(
            articles_dir.join(format!("{slug}.html")),
            tag_html.into_string(),
        )?;
        println!("Generated articles/{slug}.html");
    }

    // Generate community page
    let community_html = render_community_page(&manifest, &css);
    fs::write(
        output_dir.join("community.html"),
        community_html.into_string(),
    )?;
    println!("Generated community.html");

    // Generate hobbies page
    if !manifest.content.hobbies.is_empty() {
        let hobbies_html = render_hobbies_page(&manifest, &css);
        fs::write(output_dir.join("hobbies.html"), hobbies_html.into_string())?;
        println!("Generated hobbies.html");
    }

    println!("Site generated at {}", output_dir.display());
    Ok(())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = match entry.path().strip_prefix(src) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let dst_path = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst_path)?;
        } else {
            if let Some(parent) = dst_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst_path)?;
        }
    }
    Ok(())
}

/// Site title: explicit config value, falling back to the profile name.
fn site_title<'a>(config: &'a SiteConfig, content: &'a Content) -> &'a str {
    if config.site.title.is_empty() {
        &content.profile.name
    } else {
        &config.site.title
    }
}

/// Render a markdown string to HTML markup.
fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with name and top navigation
fn site_header(title: &str, current: &str, resume_filename: &str) -> Markup {
    let pages = [
        ("index", "/index.html", "Home"),
        ("articles", "/articles/index.html", "Articles"),
        ("community", "/community.html", "Community"),
        ("hobbies", "/hobbies.html", "Hobbies"),
    ];
    html! {
        header.site-header {
            a.site-title href="/index.html" { (title) }
            nav.site-nav {
                ul {
                    @for (key, href, label) in pages {
                        li class=[(current == key).then_some("current")] {
                            a href=(href) { (label) }
                        }
                    }
                    li.resume-link {
                        a href={ "/" (resume_filename) } download { "R\u{e9}sum\u{e9}" }
                    }
                }
            }
        }
    }
}

/// Renders the footer with the attribution line
fn site_footer(attribution: &str) -> Markup {
    html! {
        footer.site-footer {
            @if !attribution.is_empty() {
                p { (attribution) }
            }
        }
    }
}

// ============================================================================
// Index page sections
// ============================================================================

fn render_hero(content: &Content) -> Markup {
    let profile = &content.profile;
    html! {
        section #hero .hero {
            h1 { (profile.name) }
            @if !profile.headline.is_empty() {
                p.headline { (profile.headline) }
            }
            @if !profile.tagline.is_empty() {
                p.tagline { (profile.tagline) }
            }
            @if !profile.location.is_empty() {
                p.location { (profile.location) }
            }
        }
    }
}

fn render_about(content: &Content) -> Markup {
    html! {
        @if !content.profile.summary.is_empty() {
            section #about .about {
                h2 { "About" }
                div.about-body { (markdown(&content.profile.summary)) }
            }
        }
    }
}

fn render_achievements(content: &Content) -> Markup {
    html! {
        @if !content.achievements.is_empty() {
            section #achievements .achievements {
                h2 { "Key Achievements" }
                div.achievement-grid {
                    @for group in &content.achievements {
                        div.achievement-group {
                            h3 { (group.category) }
                            ul {
                                @for metric in &group.metrics {
                                    li.metric {
                                        span.metric-value { (metric.value) }
                                        span.metric-label { (metric.label) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_experience(content: &Content) -> Markup {
    html! {
        @if !content.experience.is_empty() {
            section #experience .experience {
                h2 { "Experience" }
                @for company in &content.experience {
                    article.company {
                        h3 { (company.company) }
                        @for role in &company.roles {
                            div.role {
                                header.role-header {
                                    span.role-title { (role.title) }
                                    span.role-period { (role.period) }
                                }
                                @if !role.description.is_empty() {
                                    p.role-description { (role.description) }
                                }
                                @if !role.highlights.is_empty() {
                                    ul.highlights {
                                        @for highlight in &role.highlights {
                                            li { (highlight) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_skills(content: &Content) -> Markup {
    html! {
        @if !content.skills.is_empty() {
            section #skills .skills {
                h2 { "Skills" }
                div.skill-grid {
                    @for group in &content.skills {
                        div.skill-group {
                            h3 { (group.category) }
                            ul {
                                @for item in &group.items {
                                    li.chip { (item) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_certifications(content: &Content) -> Markup {
    html! {
        @if !content.certifications.is_empty() {
            section #certifications .certifications {
                h2 { "Certifications" }
                ul {
                    @for cert in &content.certifications {
                        li {
                            span.cert-name { (cert.name) }
                            " "
                            span.cert-issuer { (cert.issuer) }
                        }
                    }
                }
            }
        }
    }
}

fn render_education(content: &Content) -> Markup {
    html! {
        @if !content.education.is_empty() {
            section #education .education {
                h2 { "Education" }
                @for entry in &content.education {
                    div.education-entry {
                        span.degree {
                            (entry.degree)
                            @if !entry.field.is_empty() { ", " (entry.field) }
                        }
                        span.institution { (entry.institution) }
                        span.period { (entry.period) }
                    }
                }
            }
        }
    }
}

fn render_contact(content: &Content) -> Markup {
    let contact = &content.contact;
    let has_anything = contact.email.is_some() || !contact.links.is_empty();
    html! {
        @if has_anything {
            section #contact .contact {
                h2 { "Contact" }
                ul {
                    @if let Some(email) = &contact.email {
                        li {
                            a href={ "mailto:" (email) } { (email) }
                        }
                    }
                    @for link in &contact.links {
                        li {
                            a href=(link.url) target="_blank" rel="noopener" { (link.label) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index/home page with all résumé sections
fn render_index(manifest: &SiteManifest, css: &str) -> Markup {
    let content_model = &manifest.content;
    let title = site_title(&manifest.config, content_model);

    let content = html! {
        (site_header(title, "index", &manifest.config.pdf.filename))
        main.index-page {
            (render_hero(content_model))
            (render_about(content_model))
            (render_achievements(content_model))
            (render_experience(content_model))
            (render_skills(content_model))
            (render_certifications(content_model))
            (render_education(content_model))
            (render_contact(content_model))
        }
        (site_footer(&manifest.config.site.attribution))
        script { (PreEscaped(JS)) }
    };

    base_document(title, css, content)
}

fn render_article_card(article: &Article) -> Markup {
    html! {
        article.article-card {
            h3 {
                a href=(article.url) target="_blank" rel="noopener" { (article.title) }
            }
            @if !article.excerpt.is_empty() {
                p.excerpt { (article.excerpt) }
            }
            p.article-meta {
                @if !article.published.is_empty() {
                    span.published { (article.published) }
                }
                @if article.read_minutes > 0 {
                    span.read-time { (article.read_minutes) " min read" }
                }
                @if !article.source.is_empty() {
                    span.source { (article.source) }
                }
            }
            @if !article.tags.is_empty() {
                ul.tags {
                    @for tag in &article.tags {
                        li.chip {
                            a href={ (content::tag_slug(tag)) ".html" } { (tag) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the articles page, optionally filtered to one tag.
///
/// Pages for every tag live flat next to `index.html`, so the tag chips use
/// the same relative hrefs from any article page.
fn render_articles_page(manifest: &SiteManifest, tag: Option<&str>, css: &str) -> Markup {
    let articles = &manifest.content.articles;
    let filtered = content::filter_by_tag(articles, tag);
    let tags = content::all_tags(articles);
    let title = site_title(&manifest.config, &manifest.content);

    let content = html! {
        (site_header(title, "articles", &manifest.config.pdf.filename))
        main.articles-page {
            h1 { "Articles" }
            nav.tag-filter {
                ul {
                    li class=[tag.is_none().then_some("current")] {
                        a href="index.html" { "All" }
                    }
                    @for t in &tags {
                        li class=[(tag == Some(*t)).then_some("current")] {
                            a href={ (content::tag_slug(t)) ".html" } { (t) }
                        }
                    }
                }
            }
            @if filtered.is_empty() {
                p.empty-note { "No articles here yet." }
            } @else {
                div.article-grid {
                    @for article in &filtered {
                        (render_article_card(article))
                    }
                }
            }
        }
        (site_footer(&manifest.config.site.attribution))
    };

    let page_title = match tag {
        Some(t) => format!("Articles tagged {t} - {title}"),
        None => format!("Articles - {title}"),
    };
    base_document(&page_title, css, content)
}

fn render_project_card(project: &Project) -> Markup {
    html! {
        article.project-card {
            h3 {
                a href=(project.url) target="_blank" rel="noopener" { (project.name) }
            }
            @if !project.tagline.is_empty() {
                p.tagline { (project.tagline) }
            }
            @if !project.description.is_empty() {
                p.description { (project.description) }
            }
            @if !project.features.is_empty() {
                ul.features {
                    @for feature in &project.features {
                        li { (feature) }
                    }
                }
            }
            @if !project.technologies.is_empty() {
                ul.tags {
                    @for tech in &project.technologies {
                        li.chip { (tech) }
                    }
                }
            }
            @if let Some(live) = &project.live_url {
                a.live-link href=(live) target="_blank" rel="noopener" { "Live" }
            }
        }
    }
}

fn render_repo_card(repo: &Repository) -> Markup {
    html! {
        article.repo-card {
            h3 {
                a href=(repo.html_url) target="_blank" rel="noopener" { (repo.name) }
            }
            @if let Some(description) = &repo.description {
                p.description { (description) }
            }
            p.repo-meta {
                @if let Some(language) = &repo.language {
                    span.language { (language) }
                }
                span.stars { "\u{2605} " (repo.stargazers_count) }
                @if repo.forks_count > 0 {
                    span.forks { (repo.forks_count) " forks" }
                }
            }
            @if !repo.topics.is_empty() {
                ul.tags {
                    @for topic in &repo.topics {
                        li.chip { (topic) }
                    }
                }
            }
        }
    }
}

/// Renders the repository listing section for each fetch outcome.
///
/// `Failed` renders a static error panel in place of the cards; `Skipped`
/// renders a short note. The build never fails because the listing did.
fn render_repo_listing(listing: &RepoListing) -> Markup {
    html! {
        section.repo-listing {
            h2 { "Open Source" }
            @match listing {
                RepoListing::Fetched { repos } => {
                    @if repos.is_empty() {
                        p.empty-note { "No public repositories to show." }
                    } @else {
                        div.repo-grid {
                            @for repo in repos {
                                (render_repo_card(repo))
                            }
                        }
                    }
                }
                RepoListing::Failed { message } => {
                    div.error-panel {
                        p { "Could not load the repository listing." }
                        p.error-detail { (message) }
                    }
                }
                RepoListing::Skipped => {
                    p.empty-note { "Repository listing is disabled." }
                }
            }
        }
    }
}

/// Renders the community page: featured projects above the repo listing
fn render_community_page(manifest: &SiteManifest, css: &str) -> Markup {
    let title = site_title(&manifest.config, &manifest.content);

    let content = html! {
        (site_header(title, "community", &manifest.config.pdf.filename))
        main.community-page {
            h1 { "Community" }
            @if !manifest.content.projects.is_empty() {
                section.featured-projects {
                    h2 { "Featured Projects" }
                    div.project-grid {
                        @for project in &manifest.content.projects {
                            (render_project_card(project))
                        }
                    }
                }
            }
            (render_repo_listing(&manifest.repos))
        }
        (site_footer(&manifest.config.site.attribution))
    };

    base_document(&format!("Community - {title}"), css, content)
}

fn render_hobby_card(hobby: &Hobby) -> Markup {
    html! {
        figure.hobby-card {
            img src=(hobby.image) alt=(hobby.title) loading="lazy";
            figcaption {
                span.hobby-title { (hobby.title) }
                @if !hobby.caption.is_empty() {
                    span.hobby-caption { (hobby.caption) }
                }
            }
        }
    }
}

/// Renders the hobbies page with photo cards
fn render_hobbies_page(manifest: &SiteManifest, css: &str) -> Markup {
    let title = site_title(&manifest.config, &manifest.content);

    let content = html! {
        (site_header(title, "hobbies", &manifest.config.pdf.filename))
        main.hobbies-page {
            h1 { "Hobbies" }
            div.hobby-grid {
                @for hobby in &manifest.content.hobbies {
                    (render_hobby_card(hobby))
                }
            }
        }
        (site_footer(&manifest.config.site.attribution))
    };

    base_document(&format!("Hobbies - {title}"), css, content)
}

// ============================================================================
// Tests
// ============================================================================
