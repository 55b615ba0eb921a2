//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试。
//! 客户查询接受编译后的谓词；聚合字段更新由仓储原子完成，
//! 订单摄入是这三个字段的唯一写入方。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use segment_rules::CustomerPredicate;

use crate::error::Result;
use crate::models::{Campaign, CommunicationLog, Customer, Order, Segment};

/// 客户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepositoryTrait: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer>;
    async fn update(&self, customer: &Customer) -> Result<Customer>;
    async fn get(&self, id: &str) -> Result<Option<Customer>>;
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>>;

    /// 按谓词统计匹配客户数
    async fn count(&self, predicate: &CustomerPredicate) -> Result<usize>;

    /// 按谓词查询匹配客户（插入顺序）
    async fn find_matching(&self, predicate: &CustomerPredicate) -> Result<Vec<Customer>>;

    /// 原子累加订单聚合字段
    ///
    /// total_spend += amount, total_visits += 1, last_visit = order_date
    async fn apply_order_aggregates(
        &self,
        customer_id: &str,
        amount: f64,
        order_date: DateTime<Utc>,
    ) -> Result<Customer>;
}

/// 订单仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepositoryTrait: Send + Sync {
    async fn create(&self, order: &Order) -> Result<Order>;
    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Order>>;
}

/// 客群仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SegmentRepositoryTrait: Send + Sync {
    async fn create(&self, segment: &Segment) -> Result<Segment>;
    async fn get(&self, id: &str) -> Result<Option<Segment>>;
    async fn list(&self) -> Result<Vec<Segment>>;
}

/// 营销活动仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    async fn create(&self, campaign: &Campaign) -> Result<Campaign>;
    async fn get(&self, id: &str) -> Result<Option<Campaign>>;
    async fn list(&self) -> Result<Vec<Campaign>>;

    /// 活动状态置为 completed（单向转移）
    async fn complete(&self, id: &str, completed_at: DateTime<Utc>) -> Result<Campaign>;
}

/// 沟通日志仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunicationLogRepositoryTrait: Send + Sync {
    async fn create(&self, log: &CommunicationLog) -> Result<CommunicationLog>;

    /// 日志状态 sent → delivered 并记录回执时间
    async fn mark_delivered(
        &self,
        id: &str,
        delivered_at: DateTime<Utc>,
    ) -> Result<CommunicationLog>;

    async fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<CommunicationLog>>;
}
