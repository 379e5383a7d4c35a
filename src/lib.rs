//! # Vitae
//!
//! A static résumé site generator with PDF export. A single `content.toml`
//! is the data source: profile, work history, skills, articles, projects,
//! and hobbies are plain data, and changing them never touches code.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Vitae builds through four independent stages:
//!
//! ```text
//! 1. Load      content/   →  content + config   (TOML → structured data)
//! 2. Fetch     GitHub     →  repo listing       (optional, never fatal)
//! 3. Generate  manifest   →  dist/              (static HTML site)
//! 4. Export    content    →  dist/resume.pdf    (paginated PDF)
//! ```
//!
//! The build writes a `manifest.json` snapshot of everything stage 3
//! consumed into the temp directory. It is never required by a later run —
//! a build is cheap enough to redo from scratch — but a human-readable dump
//! of the generator's exact input makes pipeline problems inspectable.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1 — loads and validates `content.toml`; the article tag filter |
//! | [`fetch`] | Stage 2 — fetches the public repository listing, applies the denylist |
//! | [`generate`] | Stage 3 — renders the HTML site from the manifest using Maud |
//! | [`export`] | Stage 4 — lays the résumé onto pages and encodes the PDF |
//! | [`config`] | `config.toml` loading, stock-default merging, CSS variable generation |
//! | [`types`] | Shared types serialized between stages (`SiteManifest`, `RepoListing`) |
//! | [`output`] | CLI output formatting — inventory-style display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Content as Data
//!
//! Everything the site shows lives in `content.toml`. There is no
//! per-section template to edit and no content compiled into the binary;
//! the renderer is a pure function of the content model. Unknown keys are
//! rejected so typos surface at load time instead of as silently missing
//! sections.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, and all
//! interpolation is auto-escaped.
//!
//! ## Measured PDF Layout, No Browser
//!
//! The PDF exporter does not shell out to a headless browser. It lays text
//! onto fixed-size pages itself using the standard Helvetica metrics, with
//! an explicit cursor and page-break rule, and assembles the document with
//! `lopdf`. Pagination is therefore deterministic and unit-testable: the
//! layout pass produces positioned spans that tests can inspect before any
//! PDF bytes exist.
//!
//! ## The Fetch Is Never Fatal
//!
//! The repository listing is the only network dependency, and a portfolio
//! build must not fail because an API is down. A fetch error is rendered as
//! a static panel on the community page; `--offline` skips the request
//! entirely.

pub mod config;
pub mod content;
pub mod export;
pub mod fetch;
pub mod generate;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
