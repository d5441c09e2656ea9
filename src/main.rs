use clap::{Parser, Subcommand};
use save_the_date::carousel::{RearmPolicy, Slides};
use save_the_date::simulate::{self, ScriptedAction};
use save_the_date::{config, generate, output, scan};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

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
#[command(name = "save-the-date")]
#[command(about = "Static generator for wedding save-the-date pages")]
#[command(long_about = "\
Static generator for wedding save-the-date pages

Your content directory is the data source. Images become the slides of a
crossfading carousel, ordered by numeric prefix; config.toml supplies the
names, date, place, links and carousel timing.

Content structure:

  content/
  ├── config.toml          # Site config (optional)
  ├── assets/              # Static assets (favicon, fonts) → copied to output
  ├── 010-foto1.png        # Slide (numbered = explicit order)
  ├── 020-foto2.png
  └── rings.jpg            # Unnumbered slides come last, by filename

Output:

  dist/
  ├── index.html           # The page, with inline CSS and carousel script
  ├── slides/              # Slide images, copied unchanged
  └── assets/

Run 'save-the-date gen-config' to generate a documented config.toml.
Set RUST_LOG=debug to trace carousel and build internals.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".save-the-date-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML page from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Replay carousel interactions on a virtual clock and print the timeline
    Simulate(SimulateArgs),
}

#[derive(clap::Args)]
struct SimulateArgs {
    /// Number of slides
    #[arg(long, default_value_t = 2,
          value_parser = clap::value_parser!(u64).range(1..=simulate::MAX_SLIDES))]
    slides: u64,

    /// How long to run, in milliseconds
    #[arg(long = "duration", default_value_t = 15_000,
          value_parser = clap::value_parser!(u64).range(0..=simulate::MAX_DURATION_MS))]
    duration_ms: u64,

    /// User action as <at_ms>:<next|prev|goto=INDEX> (repeatable)
    #[arg(long = "event")]
    events: Vec<ScriptedAction>,

    /// Override the configured rearm policy (independent, on-change)
    #[arg(long)]
    rearm: Option<RearmPolicy>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            generate::generate(&manifest_path, &cli.source, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            generate::write_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Simulate(args) => {
            let site_config = config::load_config(&cli.source)?;
            let mut timing = site_config.carousel.timing();
            if let Some(rearm) = args.rearm {
                timing.rearm = rearm;
            }
            let entries = simulate::run(
                Slides::numbered(usize::try_from(args.slides)?)?,
                timing,
                &args.events,
                Duration::from_millis(args.duration_ms),
            )?;
            output::print_timeline(&entries);
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays the CLI output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}
