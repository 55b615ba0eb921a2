//! 营销活动派发引擎
//!
//! 处理活动发起的核心流程：
//! - 客群解析（引用已有客群或内联规则隐式建群）
//! - 逐客户消息个性化
//! - 模拟供应商发送（固定成功率，注入随机源）
//! - 模拟投递回执（sent → delivered）
//! - 活动完结（running → completed）
//!
//! ## 派发流程
//!
//! 1. 请求校验 -> 2. 客群解析 -> 3. 创建活动 -> 4. 逐客户发送+回执
//!    -> 5. 活动完结
//!
//! 发送与回执拆分为 `record_send` / `record_delivery_ack` 两个独立
//! 操作，当前实现背靠背同步调用；接入真实渠道后回执改为异步
//! webhook 触发，引擎结构无需调整。
//!
//! 全程单遍顺序处理，无重试。缺失客群按空集处理（活动照常完结，
//! 零日志）；派发中断时活动停留在 running，无续发协议（已知缺口）。

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

use segment_rules::{CustomerPredicate, RuleCompiler};

use crate::config::DispatchConfig;
use crate::dto::LaunchCampaignRequest;
use crate::error::{CrmError, Result};
use crate::models::{Campaign, CommunicationLog, DeliveryStatus, Segment};
use crate::repository::{
    CampaignRepositoryTrait, CommunicationLogRepositoryTrait, CustomerRepositoryTrait,
    SegmentRepositoryTrait,
};
use crate::template;

/// 派发引擎
///
/// 随机源由构造方注入（可用固定种子），测试可以确定性地
/// 驱动 sent/failed 结果来验证成功率策略。
pub struct DispatchEngine<CR, SR, PR, LR>
where
    CR: CustomerRepositoryTrait,
    SR: SegmentRepositoryTrait,
    PR: CampaignRepositoryTrait,
    LR: CommunicationLogRepositoryTrait,
{
    customer_repo: Arc<CR>,
    segment_repo: Arc<SR>,
    campaign_repo: Arc<PR>,
    log_repo: Arc<LR>,
    compiler: RuleCompiler,
    config: DispatchConfig,
    rng: Mutex<StdRng>,
}

impl<CR, SR, PR, LR> DispatchEngine<CR, SR, PR, LR>
where
    CR: CustomerRepositoryTrait,
    SR: SegmentRepositoryTrait,
    PR: CampaignRepositoryTrait,
    LR: CommunicationLogRepositoryTrait,
{
    pub fn new(
        customer_repo: Arc<CR>,
        segment_repo: Arc<SR>,
        campaign_repo: Arc<PR>,
        log_repo: Arc<LR>,
        config: DispatchConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            customer_repo,
            segment_repo,
            campaign_repo,
            log_repo,
            compiler: RuleCompiler::new(),
            config,
            rng: Mutex::new(rng),
        }
    }

    /// 发起并派发营销活动
    ///
    /// 同步单遍执行，返回完结后的活动
    pub async fn launch(&self, request: LaunchCampaignRequest) -> Result<Campaign> {
        request.validate()?;

        let (segment_id, predicate) = self.resolve_segment(&request).await?;

        let campaign = Campaign::new(
            request.name,
            request.message,
            segment_id,
            request.created_by,
        );
        let campaign = self.campaign_repo.create(&campaign).await?;

        let audience = self.customer_repo.find_matching(&predicate).await?;
        info!(
            campaign_id = %campaign.id,
            segment_id = %campaign.segment_id,
            audience_size = audience.len(),
            "开始派发营销活动"
        );

        for customer in &audience {
            let message = template::personalize(&campaign.message, &customer.name);
            let log = self
                .record_send(&campaign.id, &customer.id, message)
                .await?;

            // 背靠背模拟供应商回执；真实渠道接入后由 webhook 驱动
            if log.status == DeliveryStatus::Sent {
                self.record_delivery_ack(&log.id).await?;
            }
        }

        let completed = self.campaign_repo.complete(&campaign.id, Utc::now()).await?;
        info!(
            campaign_id = %completed.id,
            audience_size = audience.len(),
            "营销活动派发完成"
        );
        Ok(completed)
    }

    /// 记录一次发送尝试
    ///
    /// 按配置成功率抽样：成功产生 sent 日志（带发送时间），
    /// 失败产生 failed 日志（终态，无失败原因）
    pub async fn record_send(
        &self,
        campaign_id: &str,
        customer_id: &str,
        message: String,
    ) -> Result<CommunicationLog> {
        let succeeded = {
            let mut rng = self.rng.lock().await;
            rng.random_range(0.0..1.0) < self.config.success_rate
        };

        let log = if succeeded {
            CommunicationLog::sent(campaign_id, customer_id, message, Utc::now())
        } else {
            CommunicationLog::failed(campaign_id, customer_id, message)
        };
        self.log_repo.create(&log).await
    }

    /// 记录投递回执
    ///
    /// sent → delivered 状态转移，failed 条目不受影响
    pub async fn record_delivery_ack(&self, log_id: &str) -> Result<CommunicationLog> {
        self.log_repo.mark_delivered(log_id, Utc::now()).await
    }

    /// 解析派发目标客群
    ///
    /// 引用已有客群时按其规则编译谓词；客群缺失按"不匹配任何客户"
    /// 处理而非匹配全量（显式拒绝语义）。提供内联规则时以
    /// "活动名 segment" 隐式创建客群。
    async fn resolve_segment(
        &self,
        request: &LaunchCampaignRequest,
    ) -> Result<(String, CustomerPredicate)> {
        if let Some(segment_id) = &request.segment_id {
            return match self.segment_repo.get(segment_id).await? {
                Some(segment) => {
                    let predicate = self.compiler.compile(&segment.rules)?;
                    Ok((segment.id, predicate))
                }
                None => {
                    warn!(segment_id = %segment_id, "客群不存在，按空客群派发");
                    Ok((segment_id.clone(), CustomerPredicate::Nothing))
                }
            };
        }

        if let Some(rules) = &request.rules {
            rules.validate()?;
            let segment = Segment::new(
                format!("{} segment", request.name),
                None,
                rules.clone(),
                request.created_by.clone(),
            );
            let segment = self.segment_repo.create(&segment).await?;
            let predicate = self.compiler.compile(rules)?;
            return Ok((segment.id, predicate));
        }

        Err(CrmError::Validation(
            "必须提供 segmentId 或内联规则".to_string(),
        ))
    }
}
