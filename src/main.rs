use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use iclr_points::dataset::{cache, source_for, DatasetLoader, DocumentCache};
use iclr_points::{CoreError, IclrPoints, ScoreRow};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFERENCE_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score research areas (default if no subcommand)
    Areas,
    /// Score individual venues
    Conferences,
    /// List areas that can be used as a baseline
    ListAreas,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "iclr-points")]
#[command(about = "Normalized publication effort per research area, relative to a baseline", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/iclr-points/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Dataset location: a local JSON file or an http(s) URL
    #[arg(long, global = true)]
    data: Option<String>,

    /// First year of the range (inclusive)
    #[arg(long, global = true)]
    from: Option<i32>,

    /// Last year of the range (inclusive)
    #[arg(long, global = true)]
    to: Option<i32>,

    /// Baseline area (or venue, for `conferences`) that scores 1.00
    #[arg(short, long, global = true)]
    baseline: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Skip the on-disk cache of downloaded datasets
    #[arg(long, global = true)]
    no_cache: bool,

    /// Delete the on-disk dataset cache before running
    #[arg(long, global = true)]
    clear_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Areas);
    let start_time = Instant::now();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = match config_path.or_else(iclr_points::config::get_config_path) {
            Some(p) => p,
            None => {
                eprintln!("Could not determine home directory; pass --config <PATH>");
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = iclr_points::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load and validate config
    let config = match iclr_points::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = iclr_points::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let from_year = cli.from.unwrap_or(config.defaults.from_year);
    let to_year = cli.to.unwrap_or(config.defaults.to_year);
    if from_year > to_year {
        eprintln!("Invalid range: --from {} is after --to {}", from_year, to_year);
        std::process::exit(EXIT_CONFIG);
    }

    let cache_path = cache::get_cache_path();
    if cli.clear_cache {
        if let Err(e) = cache::clear_cache(&cache_path) {
            eprintln!("Failed to clear cache: {:#}", e);
        } else {
            log::info!("Cleared dataset cache at {}", cache_path.display());
        }
    }

    // Both durations were checked by validate_config
    let timeout = humantime::parse_duration(&config.dataset.timeout).unwrap_or_default();
    let cache_ttl = humantime::parse_duration(&config.dataset.cache_ttl).unwrap_or_default();
    let document_cache = if cli.no_cache {
        None
    } else {
        Some(DocumentCache::new(cache_path, cache_ttl))
    };

    let location = cli
        .data
        .unwrap_or_else(|| config.dataset.location().to_string());
    let source = match source_for(&location, timeout, document_cache) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Dataset error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let points = IclrPoints::new(DatasetLoader::from_boxed(source));
    let dataset = match points.load().await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if let Some((first, last)) = dataset.year_span() {
        log::debug!("Dataset covers {}..={}", first, last);
        if to_year < first || from_year > last {
            log::warn!(
                "Range {}..={} lies outside the dataset's years {}..={}",
                from_year,
                to_year,
                first,
                last
            );
        }
    }

    let result = match command {
        Commands::ListAreas => {
            match points.available_areas() {
                Ok(areas) => println!("{}", iclr_points::output::format_area_list(&areas)),
                Err(e) => exit_with(e),
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Areas => {
            let baseline = cli
                .baseline
                .unwrap_or_else(|| config.defaults.baseline_area.clone());
            if let Ok(areas) = points.available_areas() {
                if !areas.contains(&baseline) {
                    log::warn!("Baseline '{}' is not one of the available areas", baseline);
                }
            }
            points.area_scores(from_year, to_year, &baseline)
        }
        Commands::Conferences => {
            let baseline = cli
                .baseline
                .unwrap_or_else(|| config.defaults.baseline_conference.clone());
            points.conference_scores(from_year, to_year, Some(&baseline))
        }
        Commands::Init { .. } => unreachable!("init handled before loading"),
    };

    let rows = match result {
        Ok(rows) => rows,
        Err(e) => exit_with(e),
    };

    log::info!(
        "Scored {} groups for {}..={} in {:?}",
        rows.len(),
        from_year,
        to_year,
        start_time.elapsed()
    );

    match render(&rows, cli.format, &config.parent_order) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn render(rows: &[ScoreRow], format: OutputFormat, parent_order: &[String]) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => iclr_points::output::format_json(rows),
        OutputFormat::Tsv => {
            let ordered = iclr_points::output::display_order(rows, parent_order);
            Ok(iclr_points::output::format_tsv(&ordered))
        }
        OutputFormat::Table => {
            let ordered = iclr_points::output::display_order(rows, parent_order);
            let use_colors = iclr_points::output::should_use_colors();
            Ok(iclr_points::output::format_scored_table(&ordered, use_colors))
        }
    }
}

fn exit_with(error: CoreError) -> ! {
    eprintln!("{}", error);
    let code = match error {
        CoreError::ConferenceDataUnavailable => EXIT_CONFERENCE_DATA,
        CoreError::DataUnavailable(_) | CoreError::NotLoaded => EXIT_DATA,
    };
    std::process::exit(code);
}
