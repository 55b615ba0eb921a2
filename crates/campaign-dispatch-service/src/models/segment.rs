//! 客群模型

use chrono::{DateTime, Utc};
use segment_rules::SegmentRules;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 客群
///
/// 具名的持久化规则，归属于创建者。创建后不可变，
/// 没有编辑和删除操作。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub rules: SegmentRules,
    /// 创建者标识，由调用方显式传入，不依赖会话状态
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Segment {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        rules: SegmentRules,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("SEG-{}", Uuid::new_v4()),
            name: name.into(),
            description,
            rules,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }
}
