use crate::commands::{
    run_export, run_featured, run_random, run_search, run_show, run_summary, run_top,
    run_validate, ExportArgs, FeaturedArgs, RandomArgs, SearchArgs, ShowArgs, SummaryArgs,
    TopArgs,
};
use clap::{Args, Parser, Subcommand};
use date_night::config::AppConfig;
use date_night::error::AppError;
use date_night::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "date-night",
    about = "Browse, score and export the LA date night restaurant directory",
    version
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Restaurant dataset to load (overrides DATE_NIGHT_DATA)
    #[arg(long, global = true)]
    pub(crate) data: Option<PathBuf>,
    /// Featured restaurant file (overrides DATE_NIGHT_FEATURED)
    #[arg(long, global = true)]
    pub(crate) featured: Option<PathBuf>,
    /// City stamped on records that carry none (overrides DATE_NIGHT_CITY)
    #[arg(long, global = true)]
    pub(crate) city: Option<String>,
    /// Seed for random picks (overrides DATE_NIGHT_SEED)
    #[arg(long, global = true)]
    pub(crate) seed: Option<u64>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the highest scoring restaurants
    Top(TopArgs),
    /// Free-text search with optional filters
    Search(SearchArgs),
    /// Pick restaurants at random, skipping featured ones by default
    Random(RandomArgs),
    /// Show one restaurant with its score breakdown
    Show(ShowArgs),
    /// City, area and cuisine summaries
    Summary(SummaryArgs),
    /// Validate the raw dataset and print a quality report
    Validate,
    /// Write the enriched dataset as JSON or CSV
    Export(ExportArgs),
    /// List active featured placements
    Featured(FeaturedArgs),
}

fn apply_overrides(config: &mut AppConfig, global: &GlobalArgs) {
    if let Some(path) = &global.data {
        config.data.restaurants_path = path.clone();
    }
    if let Some(path) = &global.featured {
        config.data.featured_path = Some(path.clone());
    }
    if let Some(city) = &global.city {
        config.catalog.city = city.clone();
    }
    if let Some(seed) = global.seed {
        config.catalog.random_seed = Some(seed);
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, &cli.global);

    telemetry::init(&config)?;
    debug!(environment = ?config.environment, data = %config.data.restaurants_path.display(), "configuration loaded");

    let json = cli.global.json;
    match cli.command {
        Command::Top(args) => run_top(&config, args, json),
        Command::Search(args) => run_search(&config, args, json),
        Command::Random(args) => run_random(&config, args, json),
        Command::Show(args) => run_show(&config, args, json),
        Command::Summary(args) => run_summary(&config, args, json),
        Command::Validate => run_validate(&config, json),
        Command::Export(args) => run_export(&config, args),
        Command::Featured(args) => run_featured(&config, args, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use date_night::catalog::Area;
    use date_night::config::{
        AppEnvironment, CatalogConfig, DataConfig, LogFormat, TelemetryConfig,
    };

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            data: DataConfig {
                restaurants_path: PathBuf::from("data/la_date_night_restaurants.json"),
                featured_path: None,
            },
            catalog: CatalogConfig {
                city: "Los Angeles".to_string(),
                random_seed: None,
            },
            telemetry: TelemetryConfig {
                log_level: None,
                format: LogFormat::Compact,
            },
        }
    }

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "date-night",
            "search",
            "wine",
            "--area",
            "venice",
            "--price",
            "3",
            "--json",
            "--seed",
            "9",
        ])
        .expect("parses");

        assert!(cli.global.json);
        assert_eq!(cli.global.seed, Some(9));
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query.as_deref(), Some("wine"));
                assert_eq!(args.area, Some(Area::Venice));
                assert_eq!(args.price, Some(3));
            }
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_area_and_out_of_range_price() {
        assert!(Cli::try_parse_from(["date-night", "search", "--area", "atlantis"]).is_err());
        assert!(Cli::try_parse_from(["date-night", "search", "--price", "5"]).is_err());
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let mut config = config();
        let global = GlobalArgs {
            data: Some(PathBuf::from("/tmp/other.json")),
            featured: Some(PathBuf::from("/tmp/featured.json")),
            city: Some("Santa Monica".to_string()),
            seed: Some(7),
            json: false,
        };
        apply_overrides(&mut config, &global);

        assert_eq!(config.data.restaurants_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(
            config.data.featured_path,
            Some(PathBuf::from("/tmp/featured.json"))
        );
        assert_eq!(config.catalog.city, "Santa Monica");
        assert_eq!(config.catalog.random_seed, Some(7));
    }

    #[test]
    fn empty_overrides_keep_config() {
        let mut config = config();
        apply_overrides(&mut config, &GlobalArgs::default());
        assert!(config.data.featured_path.is_none());
        assert_eq!(config.catalog.city, "Los Angeles");
    }
}
