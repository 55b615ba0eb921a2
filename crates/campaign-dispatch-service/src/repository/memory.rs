//! 内存仓储实现
//!
//! 基于 `MemoryStore` 的仓储实现，用于开发、测试与模拟派发。
//! 谓词过滤直接复用 `CustomerPredicate::matches` 的参考语义，
//! 查询结果按插入顺序返回。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use segment_rules::CustomerPredicate;

use crate::error::{CrmError, Result};
use crate::models::{Campaign, CampaignStatus, CommunicationLog, Customer, DeliveryStatus, Order, Segment};
use crate::store::MemoryStore;

/// 内存客户仓储
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    store: MemoryStore<Customer>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl crate::repository::CustomerRepositoryTrait for InMemoryCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<Customer> {
        self.store.insert(&customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn update(&self, customer: &Customer) -> Result<Customer> {
        if !self.store.contains(&customer.id) {
            return Err(CrmError::CustomerNotFound(customer.id.clone()));
        }
        self.store.insert(&customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Customer>> {
        Ok(self.store.get(id))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        Ok(self
            .store
            .list_by(|customer| customer.email == email)
            .into_iter()
            .next())
    }

    async fn count(&self, predicate: &CustomerPredicate) -> Result<usize> {
        Ok(self
            .store
            .count_by(|customer| predicate.matches(&customer.profile())))
    }

    async fn find_matching(&self, predicate: &CustomerPredicate) -> Result<Vec<Customer>> {
        Ok(self
            .store
            .list_by(|customer| predicate.matches(&customer.profile())))
    }

    async fn apply_order_aggregates(
        &self,
        customer_id: &str,
        amount: f64,
        order_date: DateTime<Utc>,
    ) -> Result<Customer> {
        self.store
            .update(customer_id, |customer| {
                customer.total_spend += amount;
                customer.total_visits += 1;
                customer.last_visit = Some(order_date);
            })
            .ok_or_else(|| CrmError::CustomerNotFound(customer_id.to_string()))
    }
}

/// 内存订单仓储
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    store: MemoryStore<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl crate::repository::OrderRepositoryTrait for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order> {
        self.store.insert(&order.id, order.clone());
        Ok(order.clone())
    }

    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Order>> {
        Ok(self.store.list_by(|order| order.customer_id == customer_id))
    }
}

/// 内存客群仓储
#[derive(Debug, Clone, Default)]
pub struct InMemorySegmentRepository {
    store: MemoryStore<Segment>,
}

impl InMemorySegmentRepository {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl crate::repository::SegmentRepositoryTrait for InMemorySegmentRepository {
    async fn create(&self, segment: &Segment) -> Result<Segment> {
        self.store.insert(&segment.id, segment.clone());
        Ok(segment.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Segment>> {
        Ok(self.store.get(id))
    }

    async fn list(&self) -> Result<Vec<Segment>> {
        Ok(self.store.list_ordered())
    }
}

/// 内存营销活动仓储
#[derive(Debug, Clone, Default)]
pub struct InMemoryCampaignRepository {
    store: MemoryStore<Campaign>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl crate::repository::CampaignRepositoryTrait for InMemoryCampaignRepository {
    async fn create(&self, campaign: &Campaign) -> Result<Campaign> {
        self.store.insert(&campaign.id, campaign.clone());
        Ok(campaign.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Campaign>> {
        Ok(self.store.get(id))
    }

    async fn list(&self) -> Result<Vec<Campaign>> {
        Ok(self.store.list_ordered())
    }

    async fn complete(&self, id: &str, completed_at: DateTime<Utc>) -> Result<Campaign> {
        self.store
            .update(id, |campaign| {
                campaign.status = CampaignStatus::Completed;
                campaign.completed_at = Some(completed_at);
            })
            .ok_or_else(|| CrmError::CampaignNotFound(id.to_string()))
    }
}

/// 内存沟通日志仓储
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogRepository {
    store: MemoryStore<CommunicationLog>,
}

impl InMemoryLogRepository {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl crate::repository::CommunicationLogRepositoryTrait for InMemoryLogRepository {
    async fn create(&self, log: &CommunicationLog) -> Result<CommunicationLog> {
        self.store.insert(&log.id, log.clone());
        Ok(log.clone())
    }

    async fn mark_delivered(
        &self,
        id: &str,
        delivered_at: DateTime<Utc>,
    ) -> Result<CommunicationLog> {
        self.store
            .update(id, |log| {
                // 回执只对 sent 状态生效，failed 是终态
                if log.status == DeliveryStatus::Sent {
                    log.status = DeliveryStatus::Delivered;
                    log.delivered_at = Some(delivered_at);
                }
            })
            .ok_or_else(|| CrmError::LogNotFound(id.to_string()))
    }

    async fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<CommunicationLog>> {
        Ok(self.store.list_by(|log| log.campaign_id == campaign_id))
    }
}
