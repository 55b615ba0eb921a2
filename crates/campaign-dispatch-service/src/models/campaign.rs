//! 营销活动与沟通日志模型
//!
//! 活动状态机：`running → completed`，单向且无重试。
//! 日志状态机：`sent → delivered` 或 `failed`（终态）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 营销活动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Running,
    Completed,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// 营销活动
///
/// 单次同步派发，不支持部分派发和断点续发。
/// 派发中断时活动会停留在 running 状态，这是已知缺口。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    /// 消息模板，支持 `{{name}}` 占位符
    pub message: String,
    pub segment_id: String,
    pub created_by: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Campaign {
    /// 创建处于 running 状态的新活动
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        segment_id: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("CMP-{}", Uuid::new_v4()),
            name: name.into(),
            message: message.into(),
            segment_id: segment_id.into(),
            created_by: created_by.into(),
            status: CampaignStatus::Running,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// 投递状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Failed,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => write!(f, "sent"),
            Self::Delivered => write!(f, "delivered"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// 沟通日志
///
/// 每个（活动，客户）对一条记录，发送时创建，
/// 供应商回执到达时更新一次。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationLog {
    pub id: String,
    pub campaign_id: String,
    pub customer_id: String,
    /// 个性化后的消息内容
    pub message: String,
    pub status: DeliveryStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CommunicationLog {
    /// 发送成功的日志条目
    pub fn sent(
        campaign_id: impl Into<String>,
        customer_id: impl Into<String>,
        message: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("LOG-{}", Uuid::new_v4()),
            campaign_id: campaign_id.into(),
            customer_id: customer_id.into(),
            message: message.into(),
            status: DeliveryStatus::Sent,
            sent_at: Some(sent_at),
            delivered_at: None,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }

    /// 发送失败的日志条目
    ///
    /// 模拟供应商不提供失败原因，failure_reason 留空（已知缺口）
    pub fn failed(
        campaign_id: impl Into<String>,
        customer_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("LOG-{}", Uuid::new_v4()),
            campaign_id: campaign_id.into(),
            customer_id: customer_id.into(),
            message: message.into(),
            status: DeliveryStatus::Failed,
            sent_at: None,
            delivered_at: None,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }
}
