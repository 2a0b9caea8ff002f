// Handler exports
pub mod listing;

pub use listing::HemocentroFinder;
