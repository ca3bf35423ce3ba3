use arcade_press::{catalog, config, output, site, template};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "arcade-press")]
#[command(about = "Static site generator for browsable game catalogs")]
#[command(long_about = "\
Static site generator for browsable game catalogs

A flat JSON catalog is the data source. Every game becomes a detail page,
every category an index page, and the whole catalog a paginated home
listing, all cross-linked with directory-relative URLs.

Source directory:

  site/
  ├── games.json                   # The catalog (or legacy crazy_games.json)
  ├── site.toml                    # Site config (optional)
  ├── templates/                   # Optional header.html / footer.html
  │   ├── header.html              #   overriding the embedded stock shell
  │   └── footer.html
  └── assets/                      # Copied into the output verbatim

Output structure:

  site/
  ├── index.html, page2.html, ...  # Paginated home listing
  ├── games/<category>/index.html  # One index page per category
  ├── games/<category>/<slug>.html # One detail page per game
  └── assets/                      # Stylesheet + placeholder installed if absent

The default build is in-place: --source and --output both default to the
current directory. Run 'arcade-press gen-config' for a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Source directory holding the catalog
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory for the generated site
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: load → render → write (the default)
    Build,
    /// Load and validate the catalog without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => run_build(&cli.source, &cli.output)?,
        Command::Check => run_check(&cli.source)?,
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

fn run_build(source: &Path, output_dir: &Path) -> Result<(), catalog::CatalogError> {
    let config = load_config_or_default(source);
    init_thread_pool(&config);

    println!("==> Stage 1: Loading catalog from {}", source.display());
    let catalog = catalog::load_catalog(source)?;
    output::print_catalog_output(&catalog);

    let (templates, warnings) = template::Templates::load(source);
    for warning in &warnings {
        println!("Warning: {warning}");
    }

    println!(
        "==> Stage 2: Rendering {} pages → {}",
        site::pages_planned(&catalog, &config),
        output_dir.display()
    );
    let report = site::build(&catalog, &config, &templates, source, output_dir);
    output::print_build_output(&report);

    println!("==> Build complete: {}", output_dir.display());
    Ok(())
}

fn run_check(source: &Path) -> Result<(), catalog::CatalogError> {
    let config = load_config_or_default(source);
    println!("==> Checking {}", source.display());
    let catalog = catalog::load_catalog(source)?;
    output::print_catalog_output(&catalog);
    output::print_check_output(&catalog, &config);
    println!("==> Catalog is valid");
    Ok(())
}

/// Config problems never abort a run; fall back to stock defaults.
fn load_config_or_default(source: &Path) -> config::SiteConfig {
    match config::load_config(source) {
        Ok(config) => config,
        Err(err) => {
            println!("Warning: {err}; using stock configuration");
            config::SiteConfig::default()
        }
    }
}

/// Initialize the rayon thread pool from build config.
///
/// Caps at the available CPU cores; config can constrain down, not up.
fn init_thread_pool(config: &config::SiteConfig) {
    let workers = config::effective_workers(&config.build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
