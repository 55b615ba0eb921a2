//! 存储层过滤表达式
//!
//! 规则编译的产物。谓词是纯数据结构，由客户存储解释执行；
//! `matches` 给出逐行求值的参考语义，存储实现的筛选结果必须与之一致。
//! 内存存储直接以 `matches` 作为过滤实现。

use chrono::{DateTime, Utc};

use crate::models::ComparisonOp;

/// 客户画像视图
///
/// 谓词求值所需的最小字段集合，由存储从客户记录投影得到
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudienceProfile {
    pub total_spend: f64,
    pub total_visits: u32,
    pub last_visit: Option<DateTime<Utc>>,
}

/// 客户谓词（编译后的过滤表达式）
///
/// 与规则树不同，谓词中的不活跃天数已折算为 `last_visit` 的时间比较，
/// 空值处理也已展开成显式的 `LastVisitMissing` 分支。
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerPredicate {
    /// 匹配所有客户
    All,
    /// 不匹配任何客户（用于缺失客群的显式拒绝语义）
    Nothing,
    /// 累计消费金额比较
    SpendCompare { op: ComparisonOp, value: f64 },
    /// 累计到访次数比较
    VisitsCompare { op: ComparisonOp, value: u32 },
    /// 最近到访时间与截止时间比较
    LastVisitCompare {
        op: ComparisonOp,
        cutoff: DateTime<Utc>,
    },
    /// 从未到访（last_visit 为空）
    LastVisitMissing,
    /// 所有子谓词同时成立
    And(Vec<CustomerPredicate>),
    /// 任一子谓词成立
    Or(Vec<CustomerPredicate>),
}

impl CustomerPredicate {
    /// 逐行求值
    pub fn matches(&self, profile: &AudienceProfile) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::SpendCompare { op, value } => compare_f64(profile.total_spend, *op, *value),
            Self::VisitsCompare { op, value } => compare_ord(&profile.total_visits, *op, value),
            Self::LastVisitCompare { op, cutoff } => match profile.last_visit {
                // 空值不能断言任何时间比较
                None => false,
                Some(last_visit) => compare_ord(&last_visit, *op, cutoff),
            },
            Self::LastVisitMissing => profile.last_visit.is_none(),
            Self::And(children) => children.iter().all(|child| child.matches(profile)),
            Self::Or(children) => children.iter().any(|child| child.matches(profile)),
        }
    }
}

/// 浮点比较
///
/// 相等判断用 epsilon，避免整数来源的 100 与 100.0 比较失败
fn compare_f64(field: f64, op: ComparisonOp, expected: f64) -> bool {
    match op {
        ComparisonOp::Gt => field > expected,
        ComparisonOp::Gte => field >= expected,
        ComparisonOp::Lt => field < expected,
        ComparisonOp::Lte => field <= expected,
        ComparisonOp::Eq => (field - expected).abs() < f64::EPSILON,
    }
}

/// 全序类型比较（整数、时间戳）
fn compare_ord<T: Ord>(field: &T, op: ComparisonOp, expected: &T) -> bool {
    match op {
        ComparisonOp::Gt => field > expected,
        ComparisonOp::Gte => field >= expected,
        ComparisonOp::Lt => field < expected,
        ComparisonOp::Lte => field <= expected,
        ComparisonOp::Eq => field == expected,
    }
}
