//! 自然语言翻译接入点
//!
//! 外部翻译服务（如大模型）通过 `NlRuleTranslator` trait 接入。
//! 翻译服务的产出在接受前必须通过结构校验：条件列表非空、
//! 所有字段属于已知枚举。校验失败或调用失败一律本地回退到
//! 启发式抽取器，翻译失败永远不会作为错误暴露给调用方。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::extractor::HeuristicExtractor;
use crate::models::SegmentRules;

/// 自然语言规则翻译器
///
/// 外部协作方接口。返回候选规则 JSON，格式不可信，
/// 由调用方负责解析和校验。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NlRuleTranslator: Send + Sync {
    async fn translate(&self, prompt: &str) -> Result<serde_json::Value>;
}

/// 规则翻译服务
///
/// 组合外部翻译器（可选）与本地启发式抽取器，对外保证总能产出合法规则
pub struct RuleTranslationService {
    translator: Option<Arc<dyn NlRuleTranslator>>,
    extractor: HeuristicExtractor,
}

impl RuleTranslationService {
    pub fn new(translator: Option<Arc<dyn NlRuleTranslator>>) -> Self {
        Self {
            translator,
            extractor: HeuristicExtractor::new(),
        }
    }

    /// 仅使用启发式抽取（未配置外部翻译服务时的形态）
    pub fn heuristic_only() -> Self {
        Self::new(None)
    }

    /// 将自由文本翻译为客群规则
    ///
    /// 外部翻译不可用或产出不合格时回退启发式抽取，本方法不会失败
    pub async fn translate(&self, prompt: &str) -> SegmentRules {
        let Some(translator) = &self.translator else {
            return self.extractor.extract(prompt);
        };

        match translator.translate(prompt).await {
            Ok(candidate) => match self.accept_candidate(candidate) {
                Some(rules) => rules,
                None => {
                    warn!("翻译服务产出不合格，回退启发式抽取");
                    self.extractor.extract(prompt)
                }
            },
            Err(err) => {
                warn!(error = %err, "翻译服务调用失败，回退启发式抽取");
                self.extractor.extract(prompt)
            }
        }
    }

    /// 校验翻译产出
    ///
    /// serde 解析保证字段和操作符属于已知枚举，validate 保证条件非空且取值合法
    fn accept_candidate(&self, candidate: serde_json::Value) -> Option<SegmentRules> {
        let rules: SegmentRules = match serde_json::from_value(candidate) {
            Ok(rules) => rules,
            Err(err) => {
                debug!(error = %err, "翻译产出无法解析为规则");
                return None;
            }
        };

        match rules.validate() {
            Ok(()) => Some(rules),
            Err(err) => {
                debug!(error = %err, "翻译产出未通过规则校验");
                None
            }
        }
    }
}
