//! 客群规则引擎
//!
//! 提供客群圈选规则的定义、编译与自然语言翻译能力，支持：
//! - 扁平规则树定义和解析（AND/OR + 三类条件）
//! - 规则编译为存储层过滤表达式
//! - 自然语言启发式规则抽取（无网络依赖）
//! - 外部翻译服务接入点及本地兜底

pub mod compiler;
pub mod error;
pub mod extractor;
pub mod models;
pub mod predicate;
pub mod translator;

pub use compiler::RuleCompiler;
pub use error::{Result, RuleError};
pub use extractor::HeuristicExtractor;
pub use models::{CombineOperator, ComparisonOp, Condition, SegmentRules};
pub use predicate::{AudienceProfile, CustomerPredicate};
pub use translator::{NlRuleTranslator, RuleTranslationService};
