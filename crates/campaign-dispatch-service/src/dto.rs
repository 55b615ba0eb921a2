//! 请求 DTO 定义
//!
//! 服务层入口的请求结构与参数校验。JSON 字段名与前端约定一致
//! （camelCase）。规则本身的结构校验由规则引擎负责。

use chrono::{DateTime, Utc};
use segment_rules::SegmentRules;
use serde::Deserialize;
use validator::Validate;

/// 客户摄入请求
///
/// 按邮箱去重的 upsert：已存在时更新资料，聚合字段仅在显式提供时覆盖
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[validate(email(message = "邮箱格式不合法"))]
    pub email: String,
    #[validate(length(min = 1, message = "客户姓名不能为空"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(range(min = 0.0, message = "累计消费金额不能为负"))]
    pub total_spend: Option<f64>,
    pub total_visits: Option<u32>,
    pub last_visit: Option<DateTime<Utc>>,
}

/// 订单摄入请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[validate(email(message = "邮箱格式不合法"))]
    pub customer_email: String,
    #[validate(range(exclusive_min = 0.0, message = "订单金额必须为正数"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "订单状态不能为空"))]
    pub status: String,
    pub order_date: DateTime<Utc>,
}

/// 创建客群请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSegmentRequest {
    #[validate(length(min = 1, message = "客群名称不能为空"))]
    pub name: String,
    pub description: Option<String>,
    pub rules: SegmentRules,
    #[validate(length(min = 1, message = "创建者标识不能为空"))]
    pub created_by: String,
}

/// 发起营销活动请求
///
/// segment_id 与内联 rules 二选一；提供内联规则时隐式创建客群
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LaunchCampaignRequest {
    #[validate(length(min = 1, message = "活动名称不能为空"))]
    pub name: String,
    #[validate(length(min = 1, message = "消息模板不能为空"))]
    pub message: String,
    pub segment_id: Option<String>,
    pub rules: Option<SegmentRules>,
    #[validate(length(min = 1, message = "创建者标识不能为空"))]
    pub created_by: String,
}
