pub mod aggregator;

pub use aggregator::AverageService;
