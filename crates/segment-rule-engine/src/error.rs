//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("规则解析失败: {0}")]
    ParseError(String),

    #[error("条件不合法: {0}")]
    InvalidCondition(String),

    #[error("规则必须至少包含一个条件")]
    EmptyConditions,

    #[error("自然语言翻译失败: {0}")]
    TranslationFailed(String),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RuleError>;
