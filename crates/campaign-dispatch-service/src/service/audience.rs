//! 客群解析服务
//!
//! 规则 → 谓词 → 客户存储查询。纯查询路径，不做任何写入：
//! `preview` 只取数量供界面预估，`resolve` 取完整记录供派发个性化。

use std::sync::Arc;

use segment_rules::{RuleCompiler, SegmentRules};
use tracing::debug;

use crate::error::Result;
use crate::models::Customer;
use crate::repository::CustomerRepositoryTrait;

/// 客群解析器
pub struct AudienceResolver<CR>
where
    CR: CustomerRepositoryTrait,
{
    customer_repo: Arc<CR>,
    compiler: RuleCompiler,
}

impl<CR> AudienceResolver<CR>
where
    CR: CustomerRepositoryTrait,
{
    pub fn new(customer_repo: Arc<CR>) -> Self {
        Self {
            customer_repo,
            compiler: RuleCompiler::new(),
        }
    }

    /// 预估客群规模（仅数量）
    pub async fn preview(&self, rules: &SegmentRules) -> Result<usize> {
        let predicate = self.compiler.compile(rules)?;
        let count = self.customer_repo.count(&predicate).await?;
        debug!(audience_size = count, "客群规模预估完成");
        Ok(count)
    }

    /// 解析完整客群（派发路径，按存储顺序返回）
    pub async fn resolve(&self, rules: &SegmentRules) -> Result<Vec<Customer>> {
        let predicate = self.compiler.compile(rules)?;
        self.customer_repo.find_matching(&predicate).await
    }
}
