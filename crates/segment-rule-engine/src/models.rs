//! 客群规则领域模型
//!
//! 规则树是扁平结构：一个组合操作符加一组条件，不支持嵌套子组。
//! 条件是覆盖三个客户字段的封闭标签联合，保证编译器可以做穷尽匹配。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// 比较操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Eq => "eq",
        };
        write!(f, "{}", s)
    }
}

/// 组合操作符
///
/// 规则内所有条件统一用同一个操作符组合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CombineOperator {
    And,
    Or,
}

impl fmt::Display for CombineOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// 圈选条件
///
/// 封闭的标签联合，仅支持三个聚合字段。
/// JSON 形如 `{"field": "totalSpend", "op": "gt", "value": 100}`，
/// 与前端规则构建器和翻译服务的输出格式一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "camelCase")]
pub enum Condition {
    /// 累计消费金额（非负小数）
    TotalSpend { op: ComparisonOp, value: f64 },
    /// 累计到访次数（非负整数）
    TotalVisits { op: ComparisonOp, value: u32 },
    /// 不活跃天数（正整数，按最近一次到访时间折算）
    InactiveDays { op: ComparisonOp, value: u32 },
}

impl Condition {
    pub fn total_spend(op: ComparisonOp, value: f64) -> Self {
        Self::TotalSpend { op, value }
    }

    pub fn total_visits(op: ComparisonOp, value: u32) -> Self {
        Self::TotalVisits { op, value }
    }

    pub fn inactive_days(op: ComparisonOp, value: u32) -> Self {
        Self::InactiveDays { op, value }
    }

    /// 字段名（与 JSON 标签一致，用于日志）
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::TotalSpend { .. } => "totalSpend",
            Self::TotalVisits { .. } => "totalVisits",
            Self::InactiveDays { .. } => "inactiveDays",
        }
    }

    /// 校验条件值的取值范围
    ///
    /// 整数下界由 u32 类型保证，这里只检查类型无法表达的约束
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::TotalSpend { value, .. } => {
                if !value.is_finite() || *value < 0.0 {
                    return Err(RuleError::InvalidCondition(format!(
                        "totalSpend 的值必须是非负数: {}",
                        value
                    )));
                }
            }
            Self::TotalVisits { .. } => {}
            Self::InactiveDays { value, .. } => {
                if *value == 0 {
                    return Err(RuleError::InvalidCondition(
                        "inactiveDays 的值必须是正整数".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// 客群规则
///
/// 一个组合操作符加一组有序条件，是客群定义的唯一形态。
/// 既可由结构化界面构建，也可由自然语言翻译得到。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRules {
    pub operator: CombineOperator,
    pub conditions: Vec<Condition>,
}

impl SegmentRules {
    pub fn new(operator: CombineOperator, conditions: Vec<Condition>) -> Self {
        Self {
            operator,
            conditions,
        }
    }

    /// 所有条件须同时满足
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::new(CombineOperator::And, conditions)
    }

    /// 满足任一条件即可
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::new(CombineOperator::Or, conditions)
    }

    /// 校验规则结构
    ///
    /// 规则不变式：至少一个条件，且每个条件的值合法
    pub fn validate(&self) -> Result<()> {
        if self.conditions.is_empty() {
            return Err(RuleError::EmptyConditions);
        }
        for condition in &self.conditions {
            condition.validate()?;
        }
        Ok(())
    }
}
