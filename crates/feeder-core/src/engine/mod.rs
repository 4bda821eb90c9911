pub mod aggregate;
pub mod feed;
pub mod portrait;
pub mod processor;

pub use aggregate::ValueAggregator;
pub use feed::{FeedFetch, FeedFetcher, StopReason};
pub use portrait::PortraitCache;
pub use processor::Processor;
