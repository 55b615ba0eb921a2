//! 活动投递统计
//!
//! 对沟通日志的纯聚合：sent 计 sent 与 delivered 两态（delivered
//! 必然先经过 sent），delivered 计终态成功，failed 计发送失败，
//! audience_size 为日志总数。对任意日志集合（含空集）全定义，
//! 重复计算结果一致。

use std::sync::Arc;

use serde::Serialize;

use crate::error::{CrmError, Result};
use crate::models::{CommunicationLog, DeliveryStatus};
use crate::repository::{CampaignRepositoryTrait, CommunicationLogRepositoryTrait};

/// 活动投递统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    pub audience_size: usize,
    pub sent: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// 聚合日志集合
///
/// 恒有 sent >= delivered 且 sent + failed == audience_size
pub fn aggregate(logs: &[CommunicationLog]) -> CampaignStats {
    let mut sent = 0;
    let mut delivered = 0;
    let mut failed = 0;

    for log in logs {
        match log.status {
            DeliveryStatus::Sent => sent += 1,
            DeliveryStatus::Delivered => {
                sent += 1;
                delivered += 1;
            }
            DeliveryStatus::Failed => failed += 1,
        }
    }

    CampaignStats {
        audience_size: logs.len(),
        sent,
        delivered,
        failed,
    }
}

/// 活动统计服务
pub struct CampaignStatsService<PR, LR>
where
    PR: CampaignRepositoryTrait,
    LR: CommunicationLogRepositoryTrait,
{
    campaign_repo: Arc<PR>,
    log_repo: Arc<LR>,
}

impl<PR, LR> CampaignStatsService<PR, LR>
where
    PR: CampaignRepositoryTrait,
    LR: CommunicationLogRepositoryTrait,
{
    pub fn new(campaign_repo: Arc<PR>, log_repo: Arc<LR>) -> Self {
        Self {
            campaign_repo,
            log_repo,
        }
    }

    /// 查询活动的投递统计
    pub async fn campaign_stats(&self, campaign_id: &str) -> Result<CampaignStats> {
        if self.campaign_repo.get(campaign_id).await?.is_none() {
            return Err(CrmError::CampaignNotFound(campaign_id.to_string()));
        }

        let logs = self.log_repo.list_by_campaign(campaign_id).await?;
        Ok(aggregate(&logs))
    }
}
