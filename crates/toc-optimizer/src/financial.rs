//! 財務彙總（產銷貢獻、營運費用、淨利）

use rust_decimal::Decimal;
use toc_core::{AllocationRow, OperatingExpenses, Result};

/// 財務彙總結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialSummary {
    pub total_throughput: Decimal,
    pub total_operating_expense: Decimal,
    pub net_profit: Decimal,
}

/// 財務彙總器
pub struct FinancialSummarizer;

impl FinancialSummarizer {
    /// 彙總分配表與營運費用
    ///
    /// 缺少營運費用時視為零；非數值費用項目回報 `MalformedExpenseEntry`。
    pub fn summarize(
        rows: &[AllocationRow],
        expenses: Option<&OperatingExpenses>,
    ) -> Result<FinancialSummary> {
        let total_throughput = rows.iter().map(|r| r.generated_throughput).sum::<Decimal>();

        let total_operating_expense = match expenses {
            Some(expenses) => expenses.total()?,
            None => {
                tracing::debug!("未提供營運費用，以零計算");
                Decimal::ZERO
            }
        };

        Ok(FinancialSummary {
            total_throughput,
            total_operating_expense,
            net_profit: total_throughput - total_operating_expense,
        })
    }
}
