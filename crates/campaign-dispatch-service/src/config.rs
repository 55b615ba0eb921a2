//! 配置管理模块
//!
//! 支持配置文件加载和环境变量覆盖（前缀 `CRM`，层级分隔符 `__`）。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 派发配置
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// 模拟供应商发送成功率（0.0 - 1.0）
    pub success_rate: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { success_rate: 0.9 }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级：环境变量 > 配置文件 > 默认值。
    /// 例如 `CRM__DISPATCH__SUCCESS_RATE=0.5` 覆盖发送成功率。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix("CRM").separator("__"))
            .build()?
            .try_deserialize()
    }
}
