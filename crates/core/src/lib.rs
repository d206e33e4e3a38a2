pub mod config;
pub mod geo;
pub mod metrics;
pub mod planner;
pub mod provider;
pub mod recommender;
pub mod resolver;
pub mod results;
pub mod searcher;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FanOut,
    KeywordStrategy, SanitizedConfig,
};
pub use geo::GeoPoint;
pub use provider::{GooglePlacesProvider, PlacesProvider, ProviderError, RawPlace};
pub use recommender::{RecommendQuery, Recommendations, Recommender};
pub use resolver::{resolve_included_types, Mood};
pub use results::{FilterSpec, OpenNow, Place, SortBy};
pub use searcher::{SearchError, SearchMode, SearchOrchestrator, SearchOutcome, SearchRequest};
