//! Mini-CRM 派发演示 CLI
//!
//! 命令行入口点：生成模拟数据，走完客群翻译、规模预估、
//! 活动派发与投递统计的完整链路。

mod cli;

use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use fake::Fake;
use fake::faker::name::en::Name;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use campaign_dispatch::dto::{CustomerInput, LaunchCampaignRequest, OrderInput};
use campaign_dispatch::repository::{
    InMemoryCampaignRepository, InMemoryCustomerRepository, InMemoryLogRepository,
    InMemoryOrderRepository, InMemorySegmentRepository,
};
use campaign_dispatch::{
    AppConfig, AudienceResolver, CampaignStatsService, CustomerIngestionService, DispatchEngine,
    OrderIngestionService,
};
use segment_rules::RuleTranslationService;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化 tracing 日志
    // 优先使用环境变量 RUST_LOG，否则使用命令行参数指定的级别
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    match cli.command {
        Commands::Demo {
            customers,
            max_orders,
            prompt,
            name,
            message,
            seed,
            success_rate,
        } => {
            run_demo(
                customers,
                max_orders,
                &prompt,
                name,
                message,
                seed,
                success_rate,
            )
            .await?;
        }
        Commands::Translate { prompt } => {
            run_translate(&prompt).await?;
        }
    }

    Ok(())
}

/// 端到端演示
#[allow(clippy::too_many_arguments)]
async fn run_demo(
    customer_count: usize,
    max_orders: u32,
    prompt: &str,
    name: String,
    message: String,
    seed: u64,
    success_rate: Option<f64>,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load(None)?;
    if let Some(rate) = success_rate {
        config.dispatch.success_rate = rate;
    }

    let customer_repo = Arc::new(InMemoryCustomerRepository::new());
    let order_repo = Arc::new(InMemoryOrderRepository::new());
    let segment_repo = Arc::new(InMemorySegmentRepository::new());
    let campaign_repo = Arc::new(InMemoryCampaignRepository::new());
    let log_repo = Arc::new(InMemoryLogRepository::new());

    seed_demo_data(
        Arc::clone(&customer_repo),
        Arc::clone(&order_repo),
        customer_count,
        max_orders,
        seed,
    )
    .await?;

    // 自然语言 -> 规则（无外部翻译服务，直接走启发式）
    let translation = RuleTranslationService::heuristic_only();
    let rules = translation.translate(prompt).await;
    info!(rules = %serde_json::to_string(&rules)?, "客群规则翻译完成");

    let resolver = AudienceResolver::new(Arc::clone(&customer_repo));
    let audience_size = resolver.preview(&rules).await?;
    info!(audience_size, "客群规模预估");

    let engine = DispatchEngine::new(
        Arc::clone(&customer_repo),
        segment_repo,
        Arc::clone(&campaign_repo),
        Arc::clone(&log_repo),
        config.dispatch.clone(),
        StdRng::seed_from_u64(seed),
    );

    let campaign = engine
        .launch(LaunchCampaignRequest {
            name,
            message,
            segment_id: None,
            rules: Some(rules),
            created_by: "demo-operator".to_string(),
        })
        .await?;

    let stats_service = CampaignStatsService::new(campaign_repo, log_repo);
    let stats = stats_service.campaign_stats(&campaign.id).await?;
    info!(
        campaign_id = %campaign.id,
        status = %campaign.status,
        audience_size = stats.audience_size,
        sent = stats.sent,
        delivered = stats.delivered,
        failed = stats.failed,
        "投递统计"
    );

    Ok(())
}

/// 仅执行自然语言翻译
async fn run_translate(prompt: &str) -> anyhow::Result<()> {
    let translation = RuleTranslationService::heuristic_only();
    let rules = translation.translate(prompt).await;
    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}

/// 生成模拟客户与订单
///
/// 客户邮箱按序号生成保证唯一；订单金额与时间由种子随机源控制，
/// 同一种子产出相同的客群分布
async fn seed_demo_data(
    customer_repo: Arc<InMemoryCustomerRepository>,
    order_repo: Arc<InMemoryOrderRepository>,
    customer_count: usize,
    max_orders: u32,
    seed: u64,
) -> anyhow::Result<()> {
    let customers = CustomerIngestionService::new(Arc::clone(&customer_repo));
    let orders = OrderIngestionService::new(customer_repo, order_repo);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut order_inputs = Vec::new();
    for i in 0..customer_count {
        let email = format!("customer{:04}@example.com", i);
        let name: String = Name().fake();
        customers
            .upsert(CustomerInput {
                email: email.clone(),
                name,
                phone: None,
                total_spend: None,
                total_visits: None,
                last_visit: None,
            })
            .await?;

        let order_count = rng.random_range(0..=max_orders);
        for _ in 0..order_count {
            order_inputs.push(OrderInput {
                customer_email: email.clone(),
                amount: rng.random_range(10.0..500.0),
                status: "completed".to_string(),
                order_date: Utc::now() - Duration::days(rng.random_range(0..120)),
            });
        }
    }

    let order_count = orders.record_batch(order_inputs).await?;
    info!(customer_count, order_count, "模拟数据生成完成");
    Ok(())
}
