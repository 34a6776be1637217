use access_map::config::{LoggingSettings, Settings};
use access_map::core::{mean_label, LocationStore, MapView};
use access_map::models::{feature_catalog, LocationCategory};
use access_map::services::SeedSource;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&settings.logging);
    info!("Starting AccessMap location directory...");

    let source = SeedSource::from_settings(&settings.store);
    let locations = source
        .load(settings.store.load_delay())
        .await
        .inspect_err(|e| error!("Failed to load initial locations: {}", e))?;

    let store = LocationStore::with_locations(locations, settings.store.event_capacity);
    let view = MapView::new(settings.filters.to_filters())?;

    let catalog = feature_catalog();
    info!(
        "Feature catalog: {} entries ({})",
        catalog.len(),
        catalog
            .iter()
            .map(|feature| feature.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    for category in LocationCategory::ALL {
        let count = store
            .locations()
            .iter()
            .filter(|location| location.category == category)
            .count();
        if count > 0 {
            info!("{}: {} locations", category.as_str(), count);
        }
    }

    for location in store.featured(3) {
        let label = mean_label(location.ratings).unwrap_or("Not yet rated");
        info!(
            "Featured: {} ({} from {} reviews, {})",
            location.name, location.ratings, location.review_count, label
        );
    }

    info!(
        "{} of {} locations visible with default filters",
        view.visible(&store).len(),
        store.len()
    );

    Ok(())
}
