//! 营销活动派发服务
//!
//! Mini-CRM 的核心业务 crate，覆盖从客群解析到投递统计的完整链路：
//!
//! - `models`: 客户、订单、客群、营销活动与沟通日志领域模型
//! - `store`: 内存记录存储（开发与测试环境）
//! - `repository`: 仓储接口与内存实现
//! - `service`: 客户/订单摄入、客群解析、活动派发、投递统计
//! - `template`: 消息个性化
//! - `config`: 服务配置
//!
//! 持久化存储、HTTP 层与会话机制均为外部协作方，本 crate 只依赖
//! 仓储抽象；投递为模拟实现，按固定成功率产生供应商回执。

pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;
pub mod template;

pub use config::{AppConfig, DispatchConfig};
pub use error::{CrmError, Result};
pub use models::{
    Campaign, CampaignStatus, CommunicationLog, Customer, DeliveryStatus, Order, Segment,
};
pub use service::{
    AudienceResolver, CampaignStatsService, CustomerIngestionService, DispatchEngine,
    OrderIngestionService, SegmentService,
};
