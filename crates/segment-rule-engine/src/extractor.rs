//! 启发式规则抽取器
//!
//! 基于正则模式的自然语言到客群规则翻译，不依赖任何外部服务。
//! 每个模式族独立匹配，每族最多产出一个条件；全部不命中时
//! 回退到默认条件（到访次数 >= 1），保证规则不变式始终成立。
//!
//! 这是词法级启发式而非语义解析：操作符推断只看文本中是否出现
//! 独立的 "or"，已知局限。

use regex::Regex;

use crate::models::{CombineOperator, ComparisonOp, Condition, SegmentRules};

/// 启发式抽取器
///
/// 正则在构造时编译一次，抽取过程无共享可变状态，可并发复用
pub struct HeuristicExtractor {
    spend_gt: Regex,
    spend_gte: Regex,
    spend_lt: Regex,
    visits_gte: Regex,
    visits_gt: Regex,
    visits_lt: Regex,
    inactive: Regex,
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self {
            spend_gt: Regex::new(r"spen[dt]\s+(?:more than|over|greater than)\s+(\d+(?:\.\d+)?)")
                .unwrap(),
            spend_gte: Regex::new(r"spen[dt]\s+(?:at least|>=?)\s+(\d+(?:\.\d+)?)").unwrap(),
            spend_lt: Regex::new(r"spen[dt]\s+(?:less than|under|<)\s+(\d+(?:\.\d+)?)").unwrap(),
            visits_gte: Regex::new(r"visit(?:ed)?\s+(?:at least|>=?)\s+(\d+)").unwrap(),
            visits_gt: Regex::new(r"visit(?:ed)?\s+(?:more than|over|greater than)\s+(\d+)")
                .unwrap(),
            visits_lt: Regex::new(r"visit(?:ed)?\s+(?:less than|under|<)\s+(\d+)").unwrap(),
            inactive: Regex::new(
                r"(?:inactive|haven'?t\s+(?:shopped|purchased)|no\s+orders?)\s+(?:for\s+|in\s+)?(\d+)\s+days?",
            )
            .unwrap(),
        }
    }

    /// 从自由文本抽取客群规则
    pub fn extract(&self, prompt: &str) -> SegmentRules {
        let text = prompt.to_lowercase();
        let mut conditions = Vec::new();

        // 消费金额模式族
        if let Some(value) = capture_f64(&self.spend_gt, &text) {
            conditions.push(Condition::total_spend(ComparisonOp::Gt, value));
        }
        if let Some(value) = capture_f64(&self.spend_gte, &text) {
            conditions.push(Condition::total_spend(ComparisonOp::Gte, value));
        }
        if let Some(value) = capture_f64(&self.spend_lt, &text) {
            conditions.push(Condition::total_spend(ComparisonOp::Lt, value));
        }

        // 到访次数模式族
        if let Some(value) = capture_u32(&self.visits_gte, &text) {
            conditions.push(Condition::total_visits(ComparisonOp::Gte, value));
        }
        if let Some(value) = capture_u32(&self.visits_gt, &text) {
            conditions.push(Condition::total_visits(ComparisonOp::Gt, value));
        }
        if let Some(value) = capture_u32(&self.visits_lt, &text) {
            conditions.push(Condition::total_visits(ComparisonOp::Lt, value));
        }

        // 不活跃模式族
        if let Some(value) = capture_u32(&self.inactive, &text) {
            conditions.push(Condition::inactive_days(ComparisonOp::Gte, value));
        }

        // 文本中出现独立的 "or" 时按 OR 组合
        let operator = if text.contains(" or ") {
            CombineOperator::Or
        } else {
            CombineOperator::And
        };

        if conditions.is_empty() {
            conditions.push(Condition::total_visits(ComparisonOp::Gte, 1));
        }

        SegmentRules::new(operator, conditions)
    }
}

fn capture_f64(regex: &Regex, text: &str) -> Option<f64> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn capture_u32(regex: &Regex, text: &str) -> Option<u32> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
