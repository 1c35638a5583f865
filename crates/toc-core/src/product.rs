//! 產品模型

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub product_id: String,

    /// 售價
    pub price: Decimal,

    /// 完全變動成本（銷貨成本）
    pub sales_cost: Decimal,

    /// 需求上限（可生產單位數）
    pub demand: f64,

    /// 資源耗用：資源ID → 單位耗用時間（未列出視為零）
    pub resource_usage: BTreeMap<String, f64>,
}

impl Product {
    /// 創建新的產品
    pub fn new(product_id: impl Into<String>, price: Decimal, sales_cost: Decimal, demand: f64) -> Self {
        Self {
            product_id: product_id.into(),
            price,
            sales_cost,
            demand,
            resource_usage: BTreeMap::new(),
        }
    }

    /// 建構器模式：設置資源耗用
    pub fn with_usage(mut self, resource_id: impl Into<String>, time_per_unit: f64) -> Self {
        self.resource_usage.insert(resource_id.into(), time_per_unit);
        self
    }

    /// 單位產銷貢獻 T = 售價 - 銷貨成本（可為負值，不截斷）
    pub fn unit_throughput(&self) -> Decimal {
        self.price - self.sales_cost
    }

    /// 在指定資源上的單位耗用時間
    pub fn time_on(&self, resource_id: &str) -> f64 {
        self.resource_usage.get(resource_id).copied().unwrap_or(0.0)
    }

    /// 實際耗用的資源（單位耗用時間 > 0）
    pub fn consumed_resources(&self) -> impl Iterator<Item = (&str, f64)> {
        self.resource_usage
            .iter()
            .filter(|&(_, &time)| time > 0.0)
            .map(|(id, &time)| (id.as_str(), time))
    }
}
