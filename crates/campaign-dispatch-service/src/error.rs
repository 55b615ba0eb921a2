//! 服务错误类型
//!
//! 定义业务错误和系统错误。模拟投递失败（日志状态 failed）是预期
//! 业务结果，不属于错误；翻译服务失败在规则引擎内部兜底，也不会
//! 出现在这里。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    // === 引用缺失 ===
    #[error("客户不存在: {0}")]
    CustomerNotFound(String),

    #[error("客群不存在: {0}")]
    SegmentNotFound(String),

    #[error("营销活动不存在: {0}")]
    CampaignNotFound(String),

    #[error("沟通日志不存在: {0}")]
    LogNotFound(String),

    // === 校验 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("规则错误: {0}")]
    Rule(#[from] segment_rules::RuleError),

    // === 系统错误 ===
    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CrmError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CrmError>;
