use clap::{Parser, Subcommand};
use shearline::{config, generate, output, scan, validate};
use std::path::{Path, PathBuf};

/// Shared flags for commands that write the site.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the render cache and rewrite every page
    #[arg(long)]
    no_cache: bool,
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
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "shearline")]
#[command(about = "Static site generator for industrial equipment catalogs")]
#[command(long_about = "\
Static site generator for industrial equipment catalogs

Every page is a literal dataset. TOML files describe product, application
and company pages; markdown files with TOML front matter become blog posts.

Content structure:

  content/
  ├── config.toml                       # Site, contact, navigation, theme
  ├── index.toml                        # Home page → /
  ├── about.toml                        # About page → /about
  ├── assets/                           # Images → copied to /assets/
  ├── products/
  │   ├── 010-alligator-shear.toml      # → /products/alligator-shear
  │   └── shear-prototype.toml          # No number = not listed
  ├── applications/
  │   └── 010-scrap-yards.toml          # → /applications/scrap-yards
  └── blog/
      └── 010-choosing-a-scrap-shear.md # → /blog/choosing-a-scrap-shear

Sections render in a fixed order when their table is present:
  hero, stats, intro, article, features, specs, applications,
  comparison, case_studies, carousel, faq, closing_cta

Run 'shearline gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".shearline-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Scan and validate links, CTAs and metadata without building
    Check,
    /// Produce the HTML site from a previously scanned manifest
    Generate(CacheArgs),
    /// Run the full pipeline: scan → check → generate
    Build(CacheArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            check(&manifest, &cli.source)?;
            println!("==> Content is valid");
        }
        Command::Generate(cache_args) => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            check(&manifest, &cli.source)?;
            init_thread_pool(&manifest.config.processing);
            let result =
                generate::generate(&manifest, &cli.source, &cli.output, !cache_args.no_cache)?;
            output::print_generate_output(&result);
        }
        Command::Build(cache_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Checking content");
            check(&manifest, &cli.source)?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let result =
                generate::generate(&manifest, &cli.source, &cli.output, !cache_args.no_cache)?;
            output::print_generate_output(&result);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

/// Validate and print the issue list on failure.
fn check(manifest: &scan::Manifest, source: &Path) -> Result<(), validate::ValidationError> {
    validate::validate(manifest, source).inspect_err(|e| output::print_check_output(&e.issues))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
