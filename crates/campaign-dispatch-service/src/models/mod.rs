//! 领域模型

mod campaign;
mod customer;
mod segment;

pub use campaign::{Campaign, CampaignStatus, CommunicationLog, DeliveryStatus};
pub use customer::{Customer, Order};
pub use segment::Segment;
