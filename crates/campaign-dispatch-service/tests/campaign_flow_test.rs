//! 营销活动派发流程集成测试
//!
//! 覆盖从客户摄入到投递统计的完整业务链路（内存仓储，无外部依赖）：
//! - 全成功/全失败两个极端成功率下的日志与统计
//! - 消息个性化落入日志
//! - 空客群与缺失客群的完结语义
//! - 默认成功率下的统计分布

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use campaign_dispatch::dto::{CustomerInput, LaunchCampaignRequest};
use campaign_dispatch::repository::{
    CommunicationLogRepositoryTrait, InMemoryCampaignRepository, InMemoryCustomerRepository,
    InMemoryLogRepository, InMemorySegmentRepository,
};
use campaign_dispatch::service::aggregate;
use campaign_dispatch::{
    CampaignStatsService, CampaignStatus, CustomerIngestionService, DeliveryStatus, DispatchConfig,
    DispatchEngine,
};
use segment_rules::{CombineOperator, ComparisonOp, Condition, SegmentRules};

struct TestHarness {
    customer_repo: Arc<InMemoryCustomerRepository>,
    campaign_repo: Arc<InMemoryCampaignRepository>,
    log_repo: Arc<InMemoryLogRepository>,
    engine: DispatchEngine<
        InMemoryCustomerRepository,
        InMemorySegmentRepository,
        InMemoryCampaignRepository,
        InMemoryLogRepository,
    >,
}

fn harness(success_rate: f64, seed: u64) -> TestHarness {
    let customer_repo = Arc::new(InMemoryCustomerRepository::new());
    let segment_repo = Arc::new(InMemorySegmentRepository::new());
    let campaign_repo = Arc::new(InMemoryCampaignRepository::new());
    let log_repo = Arc::new(InMemoryLogRepository::new());

    let engine = DispatchEngine::new(
        Arc::clone(&customer_repo),
        segment_repo,
        Arc::clone(&campaign_repo),
        Arc::clone(&log_repo),
        DispatchConfig { success_rate },
        StdRng::seed_from_u64(seed),
    );

    TestHarness {
        customer_repo,
        campaign_repo,
        log_repo,
        engine,
    }
}

async fn seed_customers(repo: &Arc<InMemoryCustomerRepository>, count: usize) {
    let service = CustomerIngestionService::new(Arc::clone(repo));
    for i in 0..count {
        service
            .upsert(CustomerInput {
                email: format!("customer{:04}@example.com", i),
                name: format!("Customer {}", i),
                phone: None,
                total_spend: Some(50.0 + i as f64),
                total_visits: Some(3),
                last_visit: Some(Utc::now() - Duration::days(5)),
            })
            .await
            .unwrap();
    }
}

fn match_all_rules() -> SegmentRules {
    SegmentRules::new(
        CombineOperator::And,
        vec![Condition::total_visits(ComparisonOp::Gte, 1)],
    )
}

fn launch_request(rules: Option<SegmentRules>, segment_id: Option<String>) -> LaunchCampaignRequest {
    LaunchCampaignRequest {
        name: "回流活动".to_string(),
        message: "Hi {{name}}, here's 10% off!".to_string(),
        segment_id,
        rules,
        created_by: "user-1".to_string(),
    }
}

#[tokio::test]
async fn test_full_success_rate_delivers_everyone() {
    let h = harness(1.0, 7);
    seed_customers(&h.customer_repo, 20).await;

    let campaign = h
        .engine
        .launch(launch_request(Some(match_all_rules()), None))
        .await
        .unwrap();
    assert_eq!(campaign.status, CampaignStatus::Completed);
    assert!(campaign.completed_at.is_some());

    let logs = h.log_repo.list_by_campaign(&campaign.id).await.unwrap();
    assert_eq!(logs.len(), 20);
    // 成功率 1.0 时全部经历 sent -> delivered
    assert!(logs.iter().all(|log| log.status == DeliveryStatus::Delivered));
    assert!(logs.iter().all(|log| log.sent_at.is_some() && log.delivered_at.is_some()));

    let stats = CampaignStatsService::new(h.campaign_repo, h.log_repo)
        .campaign_stats(&campaign.id)
        .await
        .unwrap();
    assert_eq!(stats.audience_size, 20);
    assert_eq!(stats.sent, 20);
    assert_eq!(stats.delivered, 20);
    assert_eq!(stats.failed, 0);
}

#[tokio::test]
async fn test_zero_success_rate_fails_everyone() {
    let h = harness(0.0, 7);
    seed_customers(&h.customer_repo, 10).await;

    let campaign = h
        .engine
        .launch(launch_request(Some(match_all_rules()), None))
        .await
        .unwrap();

    let logs = h.log_repo.list_by_campaign(&campaign.id).await.unwrap();
    assert_eq!(logs.len(), 10);
    // 失败为终态，无发送时间也无失败原因（模拟供应商不回传）
    assert!(logs.iter().all(|log| log.status == DeliveryStatus::Failed));
    assert!(logs.iter().all(|log| log.sent_at.is_none()));
    assert!(logs.iter().all(|log| log.failure_reason.is_none()));

    let stats = aggregate(&logs);
    assert_eq!(stats.sent, 0);
    assert_eq!(stats.failed, 10);
}

#[tokio::test]
async fn test_message_personalization_in_logs() {
    let h = harness(1.0, 7);
    seed_customers(&h.customer_repo, 3).await;

    let campaign = h
        .engine
        .launch(launch_request(Some(match_all_rules()), None))
        .await
        .unwrap();

    let logs = h.log_repo.list_by_campaign(&campaign.id).await.unwrap();
    assert_eq!(logs.len(), 3);
    for log in &logs {
        assert!(!log.message.contains("{{name}}"));
        assert!(log.message.starts_with("Hi Customer "));
    }
}

#[tokio::test]
async fn test_empty_audience_completes_with_zero_logs() {
    let h = harness(1.0, 7);
    seed_customers(&h.customer_repo, 5).await;

    // 无人消费超过一百万
    let rules = SegmentRules::new(
        CombineOperator::And,
        vec![Condition::total_spend(ComparisonOp::Gt, 1_000_000.0)],
    );
    let campaign = h
        .engine
        .launch(launch_request(Some(rules), None))
        .await
        .unwrap();
    assert_eq!(campaign.status, CampaignStatus::Completed);

    let logs = h.log_repo.list_by_campaign(&campaign.id).await.unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn test_missing_segment_dispatches_to_nobody() {
    let h = harness(1.0, 7);
    seed_customers(&h.customer_repo, 5).await;

    let campaign = h
        .engine
        .launch(launch_request(None, Some("SEG-missing".to_string())))
        .await
        .unwrap();
    // 缺失客群按空集处理，而不是匹配全量
    assert_eq!(campaign.status, CampaignStatus::Completed);
    assert_eq!(campaign.segment_id, "SEG-missing");

    let logs = h.log_repo.list_by_campaign(&campaign.id).await.unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn test_launch_without_segment_or_rules_is_rejected() {
    let h = harness(1.0, 7);
    let result = h.engine.launch(launch_request(None, None)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_default_success_rate_distribution() {
    let h = harness(0.9, 42);
    seed_customers(&h.customer_repo, 1000).await;

    let campaign = h
        .engine
        .launch(launch_request(Some(match_all_rules()), None))
        .await
        .unwrap();

    let stats = CampaignStatsService::new(h.campaign_repo, h.log_repo)
        .campaign_stats(&campaign.id)
        .await
        .unwrap();
    assert_eq!(stats.audience_size, 1000);
    // 固定种子下发送成功占比应贴近配置成功率
    let sent_ratio = stats.sent as f64 / stats.audience_size as f64;
    assert!((0.85..=0.95).contains(&sent_ratio), "sent_ratio={sent_ratio}");

    assert!(stats.sent >= stats.delivered);
    assert_eq!(stats.sent + stats.failed, stats.audience_size);
}
