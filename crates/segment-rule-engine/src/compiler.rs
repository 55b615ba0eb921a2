//! 规则编译器
//!
//! 将客群规则编译为存储层过滤表达式。编译前先校验规则结构，
//! 校验通过后的编译是纯函数，对所有合法规则全定义。

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::models::{CombineOperator, ComparisonOp, Condition, SegmentRules};
use crate::predicate::CustomerPredicate;

/// 规则编译器
///
/// 无内部状态，可并发复用
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleCompiler;

impl RuleCompiler {
    pub fn new() -> Self {
        Self
    }

    /// 以当前时间为基准编译规则
    pub fn compile(&self, rules: &SegmentRules) -> Result<CustomerPredicate> {
        self.compile_at(rules, Utc::now())
    }

    /// 以指定基准时间编译规则
    ///
    /// 不活跃天数条件依赖"现在"折算截止时间，注入基准时间保证可测性
    pub fn compile_at(
        &self,
        rules: &SegmentRules,
        now: DateTime<Utc>,
    ) -> Result<CustomerPredicate> {
        rules.validate()?;

        let predicates: Vec<CustomerPredicate> = rules
            .conditions
            .iter()
            .map(|condition| Self::compile_condition(condition, now))
            .collect();

        Ok(Self::combine(rules.operator, predicates))
    }

    /// 组合条件谓词
    ///
    /// 空条件列表按规则不变式不应出现，出现时退化为匹配所有客户
    fn combine(operator: CombineOperator, predicates: Vec<CustomerPredicate>) -> CustomerPredicate {
        if predicates.is_empty() {
            return CustomerPredicate::All;
        }
        match operator {
            CombineOperator::And => CustomerPredicate::And(predicates),
            CombineOperator::Or => CustomerPredicate::Or(predicates),
        }
    }

    fn compile_condition(condition: &Condition, now: DateTime<Utc>) -> CustomerPredicate {
        match *condition {
            Condition::TotalSpend { op, value } => CustomerPredicate::SpendCompare { op, value },
            Condition::TotalVisits { op, value } => CustomerPredicate::VisitsCompare { op, value },
            Condition::InactiveDays { op, value } => {
                Self::compile_inactive_days(op, value, now)
            }
        }
    }

    /// 不活跃天数条件的折算
    ///
    /// inactive_days(last_visit) = now - last_visit，因此天数比较方向
    /// 与时间比较方向相反：不活跃超过 d 天 ⇔ last_visit 早于 cutoff。
    /// gt/gte（至少不活跃 d 天）时从未到访的客户也应入选；
    /// lt/lte/eq 是对"最近有到访"的断言，空值不入选。
    fn compile_inactive_days(
        op: ComparisonOp,
        days: u32,
        now: DateTime<Utc>,
    ) -> CustomerPredicate {
        let cutoff = now - Duration::days(i64::from(days));

        match op {
            ComparisonOp::Gt => CustomerPredicate::Or(vec![
                CustomerPredicate::LastVisitMissing,
                CustomerPredicate::LastVisitCompare {
                    op: ComparisonOp::Lt,
                    cutoff,
                },
            ]),
            ComparisonOp::Gte => CustomerPredicate::Or(vec![
                CustomerPredicate::LastVisitMissing,
                CustomerPredicate::LastVisitCompare {
                    op: ComparisonOp::Lte,
                    cutoff,
                },
            ]),
            ComparisonOp::Lt => CustomerPredicate::LastVisitCompare {
                op: ComparisonOp::Gt,
                cutoff,
            },
            ComparisonOp::Lte => CustomerPredicate::LastVisitCompare {
                op: ComparisonOp::Gte,
                cutoff,
            },
            ComparisonOp::Eq => CustomerPredicate::LastVisitCompare {
                op: ComparisonOp::Eq,
                cutoff,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::predicate::AudienceProfile;

    fn profile(
        spend: f64,
        visits: u32,
        last_visit_days_ago: Option<i64>,
        now: DateTime<Utc>,
    ) -> AudienceProfile {
        AudienceProfile {
            total_spend: spend,
            total_visits: visits,
            last_visit: last_visit_days_ago.map(|d| now - Duration::days(d)),
        }
    }

    #[test]
    fn test_and_selects_intersection() {
        let now = Utc::now();
        let compiler = RuleCompiler::new();
        let rules = SegmentRules::all(vec![
            Condition::total_spend(ComparisonOp::Gt, 100.0),
            Condition::total_visits(ComparisonOp::Gte, 3),
        ]);
        let predicate = compiler.compile_at(&rules, now).unwrap();

        assert!(predicate.matches(&profile(200.0, 3, None, now)));
        assert!(!predicate.matches(&profile(200.0, 2, None, now)));
        assert!(!predicate.matches(&profile(100.0, 5, None, now)));
    }

    #[test]
    fn test_or_selects_union() {
        let now = Utc::now();
        let compiler = RuleCompiler::new();
        let rules = SegmentRules::any(vec![
            Condition::total_spend(ComparisonOp::Gt, 100.0),
            Condition::total_visits(ComparisonOp::Gte, 3),
        ]);
        let predicate = compiler.compile_at(&rules, now).unwrap();

        assert!(predicate.matches(&profile(200.0, 0, None, now)));
        assert!(predicate.matches(&profile(0.0, 3, None, now)));
        assert!(!predicate.matches(&profile(50.0, 1, None, now)));
    }

    #[test]
    fn test_inactive_days_gte_includes_never_visited() {
        let now = Utc::now();
        let compiler = RuleCompiler::new();
        let rules =
            SegmentRules::all(vec![Condition::inactive_days(ComparisonOp::Gte, 90)]);
        let predicate = compiler.compile_at(&rules, now).unwrap();

        // 从未到访的客户始终视为不活跃
        assert!(predicate.matches(&profile(0.0, 0, None, now)));
        // 91 天前到访：不活跃超过 90 天
        assert!(predicate.matches(&profile(0.0, 1, Some(91), now)));
        // 30 天前到访：仍然活跃
        assert!(!predicate.matches(&profile(0.0, 1, Some(30), now)));
    }

    #[test]
    fn test_inactive_days_lt_excludes_never_visited() {
        let now = Utc::now();
        let compiler = RuleCompiler::new();
        let rules = SegmentRules::all(vec![Condition::inactive_days(ComparisonOp::Lt, 30)]);
        let predicate = compiler.compile_at(&rules, now).unwrap();

        // 空 last_visit 无法断言"最近有到访"
        assert!(!predicate.matches(&profile(0.0, 0, None, now)));
        // 7 天前到访：不活跃少于 30 天
        assert!(predicate.matches(&profile(0.0, 1, Some(7), now)));
        assert!(!predicate.matches(&profile(0.0, 1, Some(60), now)));
    }

    #[test]
    fn test_inactive_days_boundary() {
        let now = Utc::now();
        let compiler = RuleCompiler::new();
        let predicate = compiler
            .compile_at(
                &SegmentRules::all(vec![Condition::inactive_days(ComparisonOp::Gte, 90)]),
                now,
            )
            .unwrap();

        // 恰好 90 天前（等于 cutoff）满足 gte
        assert!(predicate.matches(&profile(0.0, 1, Some(90), now)));

        let strict = compiler
            .compile_at(
                &SegmentRules::all(vec![Condition::inactive_days(ComparisonOp::Gt, 90)]),
                now,
            )
            .unwrap();
        assert!(!strict.matches(&profile(0.0, 1, Some(90), now)));
    }

    #[test]
    fn test_invalid_rules_rejected_before_compilation() {
        let compiler = RuleCompiler::new();
        let empty = SegmentRules::all(vec![]);
        assert!(matches!(
            compiler.compile(&empty),
            Err(RuleError::EmptyConditions)
        ));
    }
}
