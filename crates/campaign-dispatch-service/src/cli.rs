//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。
//!
//! # 使用示例
//!
//! ```bash
//! # 端到端演示：造数 -> 翻译 -> 预估 -> 派发 -> 统计
//! crm-demo demo --customers 200 --seed 42 \
//!     --prompt "spent more than 100 and visited at least 3 times"
//!
//! # 仅查看自然语言翻译结果
//! crm-demo translate --prompt "haven't shopped in 90 days"
//! ```

use clap::{Parser, Subcommand};

/// Mini-CRM 派发演示工具
#[derive(Parser, Debug)]
#[command(name = "crm-demo")]
#[command(version, about = "客群圈选与营销活动派发演示")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 端到端派发演示
    ///
    /// 生成模拟客户与订单，将自然语言圈选描述翻译为规则，
    /// 预估客群规模后发起一次营销活动并输出投递统计。
    Demo {
        /// 模拟客户数量
        #[arg(long, default_value = "200")]
        customers: usize,

        /// 每个客户的最大订单数
        #[arg(long, default_value = "5")]
        max_orders: u32,

        /// 客群圈选描述（自然语言）
        #[arg(
            short,
            long,
            default_value = "spent more than 100 and visited at least 3 times"
        )]
        prompt: String,

        /// 活动名称
        #[arg(long, default_value = "Demo Campaign")]
        name: String,

        /// 消息模板（支持 {{name}} 占位符）
        #[arg(long, default_value = "Hi {{name}}, here's 10% off on your next order!")]
        message: String,

        /// 随机种子（控制造数与投递模拟）
        #[arg(long, default_value = "42")]
        seed: u64,

        /// 覆盖发送成功率（默认读配置，0.9）
        #[arg(long)]
        success_rate: Option<f64>,
    },

    /// 自然语言规则翻译
    ///
    /// 输出启发式抽取器产出的规则 JSON
    Translate {
        /// 客群圈选描述
        #[arg(short, long)]
        prompt: String,
    },
}
