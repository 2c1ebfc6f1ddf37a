pub mod bulk_import;
pub mod recent_searches;
pub mod status;
pub mod tracker;
pub mod tracking_number;
pub mod translator;

pub use recent_searches::RecentSearches;
pub use tracker::TrackingService;
pub use translator::Translator;
