//! 分析目錄（資源、產品、營運費用）

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OperatingExpenses, Product, Resource, Result, TocError};

/// 已驗證的記憶體模型，由載入器提供
///
/// 資源與產品保留目錄順序；瓶頸平手與排序穩定性都依賴此順序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// 資源（目錄順序）
    pub resources: Vec<Resource>,

    /// 產品（目錄順序）
    pub products: Vec<Product>,

    /// 營運費用（缺少時視為零）
    pub operating_expenses: Option<OperatingExpenses>,
}

impl Catalog {
    /// 創建新的目錄
    pub fn new(resources: Vec<Resource>, products: Vec<Product>) -> Self {
        Self {
            resources,
            products,
            operating_expenses: None,
        }
    }

    /// 建構器模式：設置營運費用
    pub fn with_operating_expenses(mut self, expenses: OperatingExpenses) -> Self {
        self.operating_expenses = Some(expenses);
        self
    }

    /// 依ID查找資源
    pub fn resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.resource_id == resource_id)
    }

    /// 依ID查找產品
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// 檢查ID唯一性與數值範圍
    ///
    /// 未定義資源的引用不在此檢查，由負荷分析回報 `UnknownResourceReference`。
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for resource in &self.resources {
            if !seen.insert(resource.resource_id.as_str()) {
                return Err(TocError::InvalidInput(format!(
                    "重複的資源ID: {}",
                    resource.resource_id
                )));
            }
            if !resource.capacity.is_finite() {
                return Err(TocError::InvalidInput(format!(
                    "資源 {} 的產能不是有限數值",
                    resource.resource_id
                )));
            }
        }

        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.product_id.as_str()) {
                return Err(TocError::InvalidInput(format!(
                    "重複的產品ID: {}",
                    product.product_id
                )));
            }
            if product.price < Decimal::ZERO || product.sales_cost < Decimal::ZERO {
                return Err(TocError::InvalidInput(format!(
                    "產品 {} 的售價與銷貨成本必須為非負數: {} / {}",
                    product.product_id, product.price, product.sales_cost
                )));
            }
            if !(product.demand.is_finite() && product.demand >= 0.0) {
                return Err(TocError::InvalidInput(format!(
                    "產品 {} 的需求必須為非負數: {}",
                    product.product_id, product.demand
                )));
            }
            if let Some((resource_id, time)) = product
                .resource_usage
                .iter()
                .find(|(_, t)| !(t.is_finite() && **t >= 0.0))
            {
                return Err(TocError::InvalidInput(format!(
                    "產品 {} 在資源 {} 的單位耗用時間必須為非負數: {}",
                    product.product_id, resource_id, time
                )));
            }
        }

        Ok(())
    }
}

/// 資料集基本資訊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// 公司名稱
    pub company: String,

    /// 分析日期
    pub date: NaiveDate,
}

/// 完整資料集（基本資訊 + 目錄）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub info: DatasetInfo,
    pub catalog: Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![Resource::new("M", 100.0), Resource::new("S", 50.0)],
            vec![
                Product::new("X", Decimal::from(30), Decimal::from(20), 60.0).with_usage("M", 2.0),
                Product::new("Y", Decimal::from(15), Decimal::from(10), 60.0).with_usage("M", 1.0),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resource("S").map(|r| r.capacity), Some(50.0));
        assert!(catalog.resource("Z").is_none());
        assert_eq!(catalog.product("Y").map(|p| p.demand), Some(60.0));
        assert!(catalog.operating_expenses.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_catalog().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_resource() {
        let mut catalog = sample_catalog();
        catalog.resources.push(Resource::new("M", 10.0));
        assert!(matches!(catalog.validate(), Err(TocError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_negative_demand() {
        let mut catalog = sample_catalog();
        catalog.products[0].demand = -1.0;
        assert!(matches!(catalog.validate(), Err(TocError::InvalidInput(_))));
    }

    #[rstest]
    #[case(-1, 10)]
    #[case(30, -5)]
    fn test_validate_negative_money(#[case] price: i64, #[case] sales_cost: i64) {
        let mut catalog = sample_catalog();
        catalog.products[0].price = Decimal::from(price);
        catalog.products[0].sales_cost = Decimal::from(sales_cost);
        assert!(matches!(catalog.validate(), Err(TocError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_negative_usage() {
        let mut catalog = sample_catalog();
        catalog.products[1].resource_usage.insert("S".to_string(), -0.5);
        assert!(matches!(catalog.validate(), Err(TocError::InvalidInput(_))));
    }
}
