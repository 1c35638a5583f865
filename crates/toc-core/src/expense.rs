//! 營運費用模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, TocError};

/// 營運費用項目
///
/// 金額保留原始值，由 [`OperatingExpenses::total`] 在彙總時驗證，
/// 以便對非數值項目回報 `MalformedExpenseEntry`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// 費用名稱（如租金、薪資）
    pub label: String,

    /// 金額（原始值）
    pub amount: Value,
}

impl ExpenseEntry {
    /// 創建新的費用項目
    pub fn new(label: impl Into<String>, amount: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }

    /// 解析金額
    pub fn amount(&self) -> Result<Decimal> {
        let malformed = |reason: String| TocError::MalformedExpenseEntry {
            label: self.label.clone(),
            reason,
        };

        let number = match &self.amount {
            Value::Number(n) => n,
            Value::Null => return Err(malformed("缺少金額".to_string())),
            other => return Err(malformed(format!("非數值: {}", other))),
        };

        let amount = if let Some(i) = number.as_i64() {
            Decimal::from(i)
        } else if let Some(u) = number.as_u64() {
            Decimal::from(u)
        } else {
            let f = number
                .as_f64()
                .ok_or_else(|| malformed(format!("無法解析的數值: {}", number)))?;
            Decimal::try_from(f).map_err(|e| malformed(e.to_string()))?
        };

        if amount < Decimal::ZERO {
            return Err(malformed(format!("金額不可為負: {}", amount)));
        }

        Ok(amount)
    }
}

/// 營運費用（名稱 → 金額），合計與順序無關
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    pub entries: Vec<ExpenseEntry>,
}

impl OperatingExpenses {
    /// 創建空的營運費用
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加費用項目
    pub fn with_entry(mut self, label: impl Into<String>, amount: impl Into<Value>) -> Self {
        self.entries.push(ExpenseEntry::new(label, amount));
        self
    }

    /// 費用合計
    pub fn total(&self) -> Result<Decimal> {
        self.entries
            .iter()
            .map(ExpenseEntry::amount)
            .sum::<Result<Decimal>>()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_total_expenses() {
        let expenses = OperatingExpenses::new()
            .with_entry("rent", 100)
            .with_entry("salaries", 200);

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses.total().unwrap(), Decimal::from(300));
    }

    #[test]
    fn test_fractional_amount() {
        let expenses = OperatingExpenses::new().with_entry("energy", 12.5);
        assert_eq!(expenses.total().unwrap(), Decimal::new(125, 1));
    }

    #[test]
    fn test_empty_expenses_total_zero() {
        assert_eq!(OperatingExpenses::new().total().unwrap(), Decimal::ZERO);
    }

    #[rstest]
    #[case(json!("mucho"))]
    #[case(json!(null))]
    #[case(json!(true))]
    #[case(json!([1, 2]))]
    #[case(json!(-50))]
    fn test_malformed_entry(#[case] amount: Value) {
        let expenses = OperatingExpenses::new()
            .with_entry("rent", 100)
            .with_entry("misc", amount);

        match expenses.total().unwrap_err() {
            TocError::MalformedExpenseEntry { label, .. } => assert_eq!(label, "misc"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
