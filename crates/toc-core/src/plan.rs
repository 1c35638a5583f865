//! 分配結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 分配表的一列（每個產品一列）
///
/// 不變量：`0 <= allocated_units <= demand`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// 產品ID
    pub product_id: String,

    /// 優先級比率（T/C 或代理值）
    pub priority_ratio: f64,

    /// 需求
    pub demand: f64,

    /// 分配單位數
    pub allocated_units: f64,

    /// 產生的產銷貢獻（allocated_units × T）
    pub generated_throughput: Decimal,
}

impl AllocationRow {
    /// 創建新的分配列
    pub fn new(
        product_id: String,
        priority_ratio: f64,
        demand: f64,
        allocated_units: f64,
        generated_throughput: Decimal,
    ) -> Self {
        Self {
            product_id,
            priority_ratio,
            demand,
            allocated_units,
            generated_throughput,
        }
    }

    /// 未滿足的需求
    pub fn unmet_demand(&self) -> f64 {
        (self.demand - self.allocated_units).max(0.0)
    }

    /// 檢查是否完全滿足需求
    pub fn is_fully_served(&self) -> bool {
        self.allocated_units >= self.demand
    }
}

/// 分析摘要（單例輸出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// 瓶頸資源ID（僅在受限系統時存在）
    pub bottleneck_id: Option<String>,

    /// 參考資源ID（負荷最高的資源；無瓶頸時用於報告剩餘產能）
    pub reference_resource_id: Option<String>,

    /// 參考資源的原始產能
    pub reference_capacity: f64,

    /// 最大負荷係數
    pub max_load_factor: f64,

    /// 參考資源的剩餘產能
    pub residual_capacity: f64,

    /// 總產銷貢獻
    pub total_throughput: Decimal,

    /// 總營運費用
    pub total_operating_expense: Decimal,

    /// 淨利 = 總產銷貢獻 - 總營運費用
    pub net_profit: Decimal,
}

impl AnalysisSummary {
    /// 檢查是否存在瓶頸
    pub fn has_bottleneck(&self) -> bool {
        self.bottleneck_id.is_some()
    }

    /// 瓶頸標籤（無瓶頸時為 "none"）
    pub fn bottleneck_label(&self) -> &str {
        self.bottleneck_id.as_deref().unwrap_or("none")
    }
}
