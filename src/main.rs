use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitae::types::{RepoListing, SiteManifest};
use vitae::{config, content, export, fetch, generate, output};

/// Shared flags for commands that hit the network.
#[derive(clap::Args, Clone)]
struct NetworkArgs {
    /// Skip the repository listing fetch; the community page shows only
    /// hand-picked projects
    #[arg(long)]
    offline: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vitae")]
#[command(about = "Static résumé site generator with PDF export")]
#[command(long_about = "\
Static résumé site generator with PDF export

A single content.toml is the data source. The build renders a static HTML
site (index, articles with tag filters, community, hobbies) and exports the
résumé sections as a paginated PDF.

Content structure:

  content/
  ├── content.toml                 # All site content: profile, experience,
  │                                #   skills, articles, projects, hobbies
  ├── config.toml                  # Site config (optional; sparse overrides)
  └── assets/                      # Images (hobby photos) → copied to output

Pipeline stages:

  1. Load      content/  →  content + config      (TOML → structured data)
  2. Fetch     GitHub    →  repository listing    (optional, never fatal)
  3. Generate  manifest  →  dist/                 (static HTML via Maud)
  4. Export    content   →  dist/resume.pdf       (paginated PDF)

Run 'vitae gen-content' and 'vitae gen-config' for documented starter files.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest snapshot)
    #[arg(long, default_value = ".vitae-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: load → fetch → generate → export
    Build(NetworkArgs),
    /// Validate content and config without building
    Check,
    /// Fetch the repository listing and print it
    Fetch,
    /// Export only the résumé PDF
    Export {
        /// Write the PDF here instead of into the output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a starter content.toml with every section
    GenContent,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(network_args) => {
            println!("==> Stage 1: Loading {}", cli.source.display());
            let site_content = content::load_content(&cli.source)?;
            let site_config = config::load_config(&cli.source)?;
            output::print_load_output(&site_content);

            println!("==> Stage 2: Fetching repository listing");
            let repos = fetch_listing(&site_config, network_args.offline);
            output::print_fetch_output(&repos);

            let manifest = SiteManifest {
                content: site_content.clone(),
                config: site_config.clone(),
                repos,
            };
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            generate::generate(&manifest_path, &cli.source, &cli.output)?;

            println!("==> Stage 4: Exporting résumé PDF");
            if site_content.is_empty_resume() {
                println!("Skipped: no résumé sections in content.toml");
            } else {
                let pages = export::layout_resume(&site_content, &site_config).len();
                let bytes = export::export_resume(
                    &site_content,
                    &site_config,
                    &export::pdf::LopdfGenerator,
                )?;
                let pdf_path = cli.output.join(&site_config.pdf.filename);
                std::fs::write(&pdf_path, &bytes)?;
                output::print_export_output(&site_config.pdf.filename, pages, bytes.len());
            }

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_content = content::load_content(&cli.source)?;
            config::load_config(&cli.source)?;
            output::print_load_output(&site_content);
            println!("==> Content is valid");
        }
        Command::Fetch => {
            let site_config = config::load_config(&cli.source)?;
            let listing = fetch_listing(&site_config, false);
            output::print_fetch_output(&listing);
        }
        Command::Export { out } => {
            let site_content = content::load_content(&cli.source)?;
            let site_config = config::load_config(&cli.source)?;
            let pages = export::layout_resume(&site_content, &site_config).len();
            let bytes = export::export_resume(
                &site_content,
                &site_config,
                &export::pdf::LopdfGenerator,
            )?;
            let pdf_path = out.unwrap_or_else(|| cli.output.join(&site_config.pdf.filename));
            if let Some(parent) = pdf_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&pdf_path, &bytes)?;
            output::print_export_output(
                &pdf_path.display().to_string(),
                pages,
                bytes.len(),
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", content::stock_content_toml());
        }
    }

    Ok(())
}

/// Resolve the repository listing for a build.
///
/// An empty configured user or the `--offline` flag skips the fetch; a fetch
/// error is captured, not propagated, so the build always completes.
fn fetch_listing(site_config: &config::SiteConfig, offline: bool) -> RepoListing {
    if offline || site_config.github.user.is_empty() {
        return RepoListing::Skipped;
    }
    match fetch::fetch_repositories(&site_config.github) {
        Ok(repos) => RepoListing::Fetched { repos },
        Err(err) => RepoListing::Failed {
            message: err.to_string(),
        },
    }
}
