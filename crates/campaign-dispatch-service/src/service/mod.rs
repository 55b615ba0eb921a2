//! 业务服务层

mod audience;
mod dispatch;
mod ingestion;
mod segment;
mod stats;

pub use audience::AudienceResolver;
pub use dispatch::DispatchEngine;
pub use ingestion::{CustomerIngestionService, OrderIngestionService};
pub use segment::SegmentService;
pub use stats::{CampaignStats, CampaignStatsService, aggregate};
