//! 客户与订单模型
//!
//! 客户的三个聚合字段（累计消费、到访次数、最近到访）只能由订单
//! 摄入路径更新，不提供直接编辑入口。

use chrono::{DateTime, Utc};
use segment_rules::AudienceProfile;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 客户
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    /// 邮箱是客户的业务主键，摄入按邮箱去重
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    /// 累计消费金额（订单金额的累加）
    pub total_spend: f64,
    /// 累计到访次数（订单计数）
    pub total_visits: u32,
    /// 最近一次到访时间，从未下单时为空
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(email: impl Into<String>, name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            id: format!("CUS-{}", Uuid::new_v4()),
            email: email.into(),
            name: name.into(),
            phone,
            total_spend: 0.0,
            total_visits: 0,
            last_visit: None,
            created_at: Utc::now(),
        }
    }

    /// 投影为谓词求值所需的画像视图
    pub fn profile(&self) -> AudienceProfile {
        AudienceProfile {
            total_spend: self.total_spend,
            total_visits: self.total_visits,
            last_visit: self.last_visit,
        }
    }
}

/// 订单
///
/// 摄入后不可变，仅作为客户聚合字段的来源记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: String,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        customer_id: impl Into<String>,
        amount: f64,
        status: impl Into<String>,
        order_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("ORD-{}", Uuid::new_v4()),
            customer_id: customer_id.into(),
            amount,
            status: status.into(),
            order_date,
            created_at: Utc::now(),
        }
    }
}
