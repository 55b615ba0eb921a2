//! 数据摄入服务
//!
//! 客户摄入是按邮箱去重的 upsert；订单摄入在创建订单的同时
//! 原子更新客户的三个聚合字段，是这些字段的唯一写入路径。

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::{CustomerInput, OrderInput};
use crate::error::{CrmError, Result};
use crate::models::{Customer, Order};
use crate::repository::{CustomerRepositoryTrait, OrderRepositoryTrait};

/// 客户摄入服务
pub struct CustomerIngestionService<CR>
where
    CR: CustomerRepositoryTrait,
{
    customer_repo: Arc<CR>,
}

impl<CR> CustomerIngestionService<CR>
where
    CR: CustomerRepositoryTrait,
{
    pub fn new(customer_repo: Arc<CR>) -> Self {
        Self { customer_repo }
    }

    /// 按邮箱 upsert 客户
    ///
    /// 新客户的聚合字段取显式值或默认零值；已有客户只更新资料，
    /// 聚合字段仅在显式提供时覆盖
    pub async fn upsert(&self, input: CustomerInput) -> Result<Customer> {
        input.validate()?;

        match self.customer_repo.get_by_email(&input.email).await? {
            Some(mut existing) => {
                existing.name = input.name;
                if input.phone.is_some() {
                    existing.phone = input.phone;
                }
                if let Some(total_spend) = input.total_spend {
                    existing.total_spend = total_spend;
                }
                if let Some(total_visits) = input.total_visits {
                    existing.total_visits = total_visits;
                }
                if input.last_visit.is_some() {
                    existing.last_visit = input.last_visit;
                }
                self.customer_repo.update(&existing).await
            }
            None => {
                let mut customer = Customer::new(input.email, input.name, input.phone);
                customer.total_spend = input.total_spend.unwrap_or(0.0);
                customer.total_visits = input.total_visits.unwrap_or(0);
                customer.last_visit = input.last_visit;
                self.customer_repo.create(&customer).await
            }
        }
    }

    /// 批量摄入客户，返回成功数量
    pub async fn upsert_batch(&self, inputs: Vec<CustomerInput>) -> Result<usize> {
        let mut count = 0;
        for input in inputs {
            self.upsert(input).await?;
            count += 1;
        }
        info!(count, "批量客户摄入完成");
        Ok(count)
    }
}

/// 订单摄入服务
pub struct OrderIngestionService<CR, OR>
where
    CR: CustomerRepositoryTrait,
    OR: OrderRepositoryTrait,
{
    customer_repo: Arc<CR>,
    order_repo: Arc<OR>,
}

impl<CR, OR> OrderIngestionService<CR, OR>
where
    CR: CustomerRepositoryTrait,
    OR: OrderRepositoryTrait,
{
    pub fn new(customer_repo: Arc<CR>, order_repo: Arc<OR>) -> Self {
        Self {
            customer_repo,
            order_repo,
        }
    }

    /// 摄入单笔订单
    ///
    /// 客户按邮箱查找，不存在时返回错误；
    /// 订单落库后累加聚合字段并刷新最近到访时间
    pub async fn record(&self, input: OrderInput) -> Result<Order> {
        input.validate()?;

        let customer = self
            .customer_repo
            .get_by_email(&input.customer_email)
            .await?
            .ok_or_else(|| CrmError::CustomerNotFound(input.customer_email.clone()))?;

        let order = Order::new(&customer.id, input.amount, &input.status, input.order_date);
        let order = self.order_repo.create(&order).await?;

        self.customer_repo
            .apply_order_aggregates(&customer.id, input.amount, input.order_date)
            .await?;

        info!(
            order_id = %order.id,
            customer_id = %customer.id,
            amount = input.amount,
            "订单摄入完成"
        );
        Ok(order)
    }

    /// 批量摄入订单
    ///
    /// 未知客户的订单跳过不报错，返回实际摄入数量
    pub async fn record_batch(&self, inputs: Vec<OrderInput>) -> Result<usize> {
        let mut count = 0;
        for input in inputs {
            match self.record(input).await {
                Ok(_) => count += 1,
                Err(CrmError::CustomerNotFound(email)) => {
                    warn!(email = %email, "订单对应客户不存在，跳过");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCustomerRepository, InMemoryOrderRepository};
    use chrono::Utc;

    fn customer_input(email: &str, name: &str) -> CustomerInput {
        CustomerInput {
            email: email.to_string(),
            name: name.to_string(),
            phone: None,
            total_spend: None,
            total_visits: None,
            last_visit: None,
        }
    }

    fn order_input(email: &str, amount: f64) -> OrderInput {
        OrderInput {
            customer_email: email.to_string(),
            amount,
            status: "completed".to_string(),
            order_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        let service = CustomerIngestionService::new(Arc::clone(&repo));

        let created = service
            .upsert(customer_input("jane@example.com", "Jane"))
            .await
            .unwrap();
        assert_eq!(created.total_visits, 0);

        let updated = service
            .upsert(customer_input("jane@example.com", "Jane D."))
            .await
            .unwrap();
        // 同一邮箱不产生新记录
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Jane D.");
    }

    #[tokio::test]
    async fn test_order_updates_aggregates() {
        let customer_repo = Arc::new(InMemoryCustomerRepository::new());
        let order_repo = Arc::new(InMemoryOrderRepository::new());
        let customers = CustomerIngestionService::new(Arc::clone(&customer_repo));
        let orders = OrderIngestionService::new(Arc::clone(&customer_repo), order_repo);

        customers
            .upsert(customer_input("jane@example.com", "Jane"))
            .await
            .unwrap();

        orders.record(order_input("jane@example.com", 100.0)).await.unwrap();
        orders.record(order_input("jane@example.com", 50.5)).await.unwrap();

        let customer = customer_repo
            .get_by_email("jane@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.total_spend, 150.5);
        assert_eq!(customer.total_visits, 2);
        assert!(customer.last_visit.is_some());
    }

    #[tokio::test]
    async fn test_order_for_unknown_customer_fails() {
        let customer_repo = Arc::new(InMemoryCustomerRepository::new());
        let order_repo = Arc::new(InMemoryOrderRepository::new());
        let orders = OrderIngestionService::new(customer_repo, order_repo);

        let result = orders.record(order_input("ghost@example.com", 10.0)).await;
        assert!(matches!(result, Err(CrmError::CustomerNotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_skips_unknown_customers() {
        let customer_repo = Arc::new(InMemoryCustomerRepository::new());
        let order_repo = Arc::new(InMemoryOrderRepository::new());
        let customers = CustomerIngestionService::new(Arc::clone(&customer_repo));
        let orders = OrderIngestionService::new(customer_repo, order_repo);

        customers
            .upsert(customer_input("jane@example.com", "Jane"))
            .await
            .unwrap();

        let count = orders
            .record_batch(vec![
                order_input("jane@example.com", 10.0),
                order_input("ghost@example.com", 20.0),
            ])
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
