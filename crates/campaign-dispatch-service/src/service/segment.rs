//! 客群管理服务

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::CreateSegmentRequest;
use crate::error::{CrmError, Result};
use crate::models::Segment;
use crate::repository::SegmentRepositoryTrait;

/// 客群服务
///
/// 创建具名不可变客群。创建者由请求显式携带。
pub struct SegmentService<SR>
where
    SR: SegmentRepositoryTrait,
{
    segment_repo: Arc<SR>,
}

impl<SR> SegmentService<SR>
where
    SR: SegmentRepositoryTrait,
{
    pub fn new(segment_repo: Arc<SR>) -> Self {
        Self { segment_repo }
    }

    /// 创建客群
    ///
    /// 请求参数与规则结构都通过校验后才落库
    pub async fn create(&self, request: CreateSegmentRequest) -> Result<Segment> {
        request.validate()?;
        request.rules.validate()?;

        let segment = Segment::new(
            request.name,
            request.description,
            request.rules,
            request.created_by,
        );
        let segment = self.segment_repo.create(&segment).await?;

        info!(
            segment_id = %segment.id,
            name = %segment.name,
            created_by = %segment.created_by,
            "客群已创建"
        );
        Ok(segment)
    }

    pub async fn get(&self, id: &str) -> Result<Segment> {
        self.segment_repo
            .get(id)
            .await?
            .ok_or_else(|| CrmError::SegmentNotFound(id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Segment>> {
        self.segment_repo.list().await
    }
}
