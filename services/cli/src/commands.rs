use crate::infra::{load_catalog, parse_area, parse_tier, parse_timestamp, print_json, rng};
use chrono::{DateTime, Utc};
use clap::Args;
use date_night::catalog::export::{export_to_path, ExportFormat};
use date_night::catalog::validation::ValidationReport;
use date_night::catalog::views::RestaurantCard;
use date_night::catalog::{
    Area, Catalog, DateNightScorer, FeaturedRestaurant, FeaturedTier, LegacyCatalogImporter, Restaurant,
    SearchFilters,
};
use date_night::config::AppConfig;
use date_night::error::AppError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct TopArgs {
    /// Number of restaurants to list
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Text matched against name, address, cuisine tags and description
    pub(crate) query: Option<String>,
    /// Exact cuisine tag, e.g. wine_bar
    #[arg(long)]
    pub(crate) cuisine: Option<String>,
    /// Exact price level (1-4)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub(crate) price: Option<u8>,
    /// Minimum rating
    #[arg(long)]
    pub(crate) min_rating: Option<f64>,
    /// Minimum date-night score
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// Area label or slug
    #[arg(long, value_parser = parse_area)]
    pub(crate) area: Option<Area>,
    /// Neighborhood label or slug
    #[arg(long, value_parser = parse_area)]
    pub(crate) neighborhood: Option<Area>,
    /// Cap on the number of results
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

impl SearchArgs {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            cuisine: self.cuisine.clone(),
            price_level: self.price,
            min_rating: self.min_rating,
            min_score: self.min_score,
            area: self.area,
            neighborhood: self.neighborhood,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RandomArgs {
    #[arg(long, default_value_t = 6)]
    pub(crate) limit: usize,
    /// Allow featured restaurants in the picks
    #[arg(long)]
    pub(crate) include_featured: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Restaurant slug, e.g. osteria-mozza
    pub(crate) slug: String,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// City to summarise (defaults to the configured city)
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Number of cuisine categories to list
    #[arg(long, default_value_t = 5)]
    pub(crate) cuisines: usize,
    /// Keep only the first record for each slug before summarising
    #[arg(long)]
    pub(crate) dedupe: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination file
    #[arg(long)]
    pub(crate) output: PathBuf,
    /// Force csv output; otherwise the extension decides
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct FeaturedArgs {
    /// Only list one tier
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: Option<FeaturedTier>,
    #[arg(long, default_value_t = 4)]
    pub(crate) limit: usize,
    /// Evaluate expiry at this instant instead of now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn run_top(config: &AppConfig, args: TopArgs, json: bool) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let top = loaded.catalog.top(args.limit);
    render_listing(&format!("Top {} date night restaurants", top.len()), &top, json)
}

pub(crate) fn run_search(config: &AppConfig, args: SearchArgs, json: bool) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let query = args.query.clone().unwrap_or_default();
    let mut results = loaded.catalog.search(&query, &args.filters());
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    let title = if query.trim().is_empty() {
        format!("{} matching restaurants", results.len())
    } else {
        format!("{} restaurants matching '{}'", results.len(), query.trim())
    };
    render_listing(&title, &results, json)
}

pub(crate) fn run_random(config: &AppConfig, args: RandomArgs, json: bool) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let mut rng = rng(config.catalog.random_seed);
    let picks = loaded
        .catalog
        .random(args.limit, !args.include_featured, &mut rng);
    render_listing("Random date night picks", &picks, json)
}

#[derive(Serialize)]
struct RestaurantDetail<'a> {
    restaurant: &'a Restaurant,
    score_breakdown: date_night::catalog::ScoreBreakdown,
}

fn find_by_slug<'a>(catalog: &'a Catalog, slug: &str) -> Result<&'a Restaurant, AppError> {
    catalog.by_slug(slug).ok_or_else(|| AppError::UnknownRestaurant {
        slug: slug.to_string(),
    })
}

pub(crate) fn run_show(config: &AppConfig, args: ShowArgs, json: bool) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let restaurant = find_by_slug(&loaded.catalog, &args.slug)?;
    let breakdown = DateNightScorer::default().breakdown(restaurant);

    if json {
        return print_json(&RestaurantDetail {
            restaurant,
            score_breakdown: breakdown,
        });
    }

    println!("{} ({})", restaurant.name, restaurant.id);
    println!("{}", restaurant.address);
    println!(
        "{} | {} | rated {}/5 | {} reviews",
        restaurant.area,
        restaurant.price_label(),
        restaurant.rating,
        restaurant.reviews.len()
    );
    println!("{}", restaurant.description);
    if !restaurant.amenities.is_empty() {
        println!("Amenities: {}", restaurant.amenities.join(", "));
    }
    if !restaurant.special_features.is_empty() {
        println!("Special features: {}", restaurant.special_features.join(", "));
    }

    println!("\nDate night score {}", breakdown.total);
    for component in &breakdown.components {
        println!(
            "- {}: {:.0} x {:.2} = {:.1} ({})",
            component.kind.label(),
            component.value,
            component.weight,
            component.contribution,
            component.notes
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput {
    city: date_night::catalog::views::CitySummary,
    areas: Vec<date_night::catalog::views::AreaSummary>,
    cuisines: Vec<date_night::catalog::views::CuisineSummary>,
}

pub(crate) fn run_summary(config: &AppConfig, args: SummaryArgs, json: bool) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let catalog = if args.dedupe {
        loaded.catalog.deduplicated_by_slug()
    } else {
        loaded.catalog
    };
    let city = args.city.unwrap_or_else(|| config.catalog.city.clone());

    let output = SummaryOutput {
        city: catalog.city_summary(&city),
        areas: catalog.area_summaries(),
        cuisines: catalog.popular_cuisines(args.cuisines),
    };

    if json {
        return print_json(&output);
    }

    let summary = &output.city;
    println!("{}: {} restaurants", summary.city, summary.restaurant_count);
    println!(
        "Average rating {:.1} | average price level {:.1}",
        summary.average_rating, summary.average_price_level
    );
    let top: Vec<&str> = summary
        .top_restaurant_ids
        .iter()
        .map(|id| id.as_str())
        .collect();
    println!("Top restaurants: {}", top.join(", "));
    let tags: Vec<String> = summary
        .popular_cuisines
        .iter()
        .map(|entry| format!("{} ({})", entry.tag, entry.count))
        .collect();
    println!("Popular cuisines: {}", tags.join(", "));

    println!("\nAreas");
    for area in &output.areas {
        println!(
            "- {}: {} restaurants, avg rating {:.1}",
            area.area_label, area.restaurant_count, area.average_rating
        );
    }

    println!("\nCuisine categories");
    for cuisine in &output.cuisines {
        println!(
            "- {}: {} restaurants, avg rating {:.1}, avg price {:.1}",
            cuisine.category_label,
            cuisine.restaurant_count,
            cuisine.average_rating,
            cuisine.average_price_level
        );
    }
    Ok(())
}

pub(crate) fn run_validate(config: &AppConfig, json: bool) -> Result<(), AppError> {
    let dataset = LegacyCatalogImporter::from_path(&config.data.restaurants_path)?;
    let report = dataset.validate();

    if json {
        return print_json(&report);
    }
    render_validation(&report);
    Ok(())
}

pub(crate) fn run_export(config: &AppConfig, args: ExportArgs) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let format = if args.csv {
        ExportFormat::Csv
    } else {
        ExportFormat::from_path(&args.output)
    };

    export_to_path(&args.output, format, loaded.catalog.restaurants())?;
    println!(
        "Wrote {} restaurants to {} ({})",
        loaded.catalog.len(),
        args.output.display(),
        format.label()
    );
    Ok(())
}

pub(crate) fn run_featured(config: &AppConfig, args: FeaturedArgs, json: bool) -> Result<(), AppError> {
    let loaded = load_catalog(config)?;
    let now = args.now.unwrap_or_else(Utc::now);
    let entries: Vec<&FeaturedRestaurant> = match args.tier {
        Some(tier) => {
            let mut entries = loaded.featured.by_tier(tier, now);
            entries.truncate(args.limit);
            entries
        }
        None => loaded.featured.active(now, args.limit),
    };

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("Featured restaurants: none active");
        return Ok(());
    }

    println!("Featured restaurants");
    for entry in entries {
        let listing = &entry.listing;
        println!(
            "- [{}] {} (priority {}, until {})",
            listing.featured_tier,
            entry.restaurant.name,
            listing.priority,
            listing.featured_until.format("%Y-%m-%d")
        );
        if let Some(badge) = &listing.badge {
            println!("  badge: {badge}");
        }
        if let Some(offer) = &listing.special_offer {
            println!("  offer: {offer}");
        }
        println!("  {} -> {}", listing.cta_text, listing.cta_url);
    }
    Ok(())
}

fn render_listing(title: &str, restaurants: &[&Restaurant], json: bool) -> Result<(), AppError> {
    if json {
        let cards: Vec<RestaurantCard> = restaurants
            .iter()
            .map(|restaurant| RestaurantCard::from(*restaurant))
            .collect();
        return print_json(&cards);
    }

    println!("{title}");
    if restaurants.is_empty() {
        println!("- none");
        return Ok(());
    }
    for restaurant in restaurants {
        println!("{}", listing_line(restaurant));
    }
    Ok(())
}

fn listing_line(restaurant: &Restaurant) -> String {
    format!(
        "- {} [{}] {} | {} | {} | rated {}/5 | {}",
        restaurant.date_night_score,
        restaurant.slug,
        restaurant.name,
        restaurant.area,
        restaurant.price_label(),
        restaurant.rating,
        restaurant.cuisine_types.join(", ")
    )
}

fn render_validation(report: &ValidationReport) {
    println!("Validation summary");
    println!("- total restaurants: {}", report.total_restaurants);
    println!("- valid restaurants: {}", report.valid_restaurants);
    println!("- invalid restaurants: {}", report.invalid_restaurants);

    let quality = &report.quality;
    println!("\nCompleteness (valid records)");
    println!("- phone: {:.0}%", quality.has_phone_pct);
    println!("- website: {:.0}%", quality.has_website_pct);
    println!("- reviews: {:.0}%", quality.has_reviews_pct);
    println!("- photos: {:.0}%", quality.has_photos_pct);
    if let Some(ratings) = &quality.ratings {
        println!(
            "- ratings: avg {:.2}, min {}, max {}",
            ratings.average, ratings.min, ratings.max
        );
    }
    if let Some(scores) = &quality.date_night_scores {
        println!(
            "- stored scores: avg {:.1}, min {}, max {}",
            scores.average, scores.min, scores.max
        );
    }

    if report.issues.is_empty() {
        println!("\nValidation issues: none");
    } else {
        println!("\nValidation issues");
        for issue in &report.issues {
            println!("- {issue}");
        }
    }
}
