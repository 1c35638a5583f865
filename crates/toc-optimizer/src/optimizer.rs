//! TOC 主分析器

use std::collections::HashMap;

use rust_decimal::Decimal;
use toc_calc::{PriorityRanker, RankedProduct, ResourceLoadAnalyzer};
use toc_core::{AnalysisConfig, AnalysisSummary, Catalog};

use crate::allocator::{Allocation, CapacityAllocator};
use crate::financial::FinancialSummarizer;
use crate::{AnalysisWarning, TocResult};

/// TOC 分析器：目錄 → 負荷分析 → 優先級排序 → 產能分配 → 財務彙總
pub struct TocOptimizer {
    config: AnalysisConfig,
}

impl TocOptimizer {
    /// 創建新的分析器
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// 主分析入口
    ///
    /// 任一階段失敗即中止，不產生部分結果。
    pub fn optimize(&self, catalog: &Catalog) -> toc_core::Result<TocResult> {
        tracing::info!(
            "開始 TOC 分析：資源 {} 個，產品 {} 個",
            catalog.resources.len(),
            catalog.products.len()
        );

        let start_time = std::time::Instant::now();

        catalog.validate()?;

        // Step 1: 資源負荷與瓶頸識別
        tracing::debug!("Step 1: 資源負荷分析");
        let loads = ResourceLoadAnalyzer::analyze(catalog, &self.config)?;

        // Step 2: 優先級排序（無瓶頸時 C 視為零，優先級為 T 代理值）
        tracing::debug!("Step 2: 優先級排序");
        let ranked = PriorityRanker::rank(&catalog.products, loads.bottleneck_id(), &self.config)?;

        // Step 3: 產能分配
        tracing::debug!("Step 3: 產能分配");
        let allocation =
            CapacityAllocator::allocate(&ranked, &loads, &catalog.resources, &self.config)?;

        // Step 4: 財務彙總
        tracing::debug!("Step 4: 財務彙總");
        let financials =
            FinancialSummarizer::summarize(&allocation.rows, catalog.operating_expenses.as_ref())?;

        let reference = loads.reference();
        let summary = AnalysisSummary {
            bottleneck_id: loads.bottleneck_id().map(str::to_string),
            reference_resource_id: loads.reference_resource_id.clone(),
            reference_capacity: reference.map(|l| l.capacity).unwrap_or(0.0),
            max_load_factor: loads.max_load_factor,
            residual_capacity: allocation.residual_capacity,
            total_throughput: financials.total_throughput,
            total_operating_expense: financials.total_operating_expense,
            net_profit: financials.net_profit,
        };

        let warnings = Self::collect_warnings(&ranked, &allocation);

        let result = TocResult {
            run_id: uuid::Uuid::new_v4(),
            rows: allocation.rows,
            summary,
            loads,
            warnings,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        tracing::info!("TOC 分析完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "瓶頸: {}，總產銷貢獻: {}，淨利: {}",
            result.summary.bottleneck_label(),
            result.summary.total_throughput,
            result.summary.net_profit
        );

        Ok(result)
    }

    /// 產生產品層級的警告
    ///
    /// 分配表可能為目錄順序（無瓶頸）或排序順序，因此以產品ID對應排序結果。
    fn collect_warnings(ranked: &[RankedProduct<'_>], allocation: &Allocation) -> Vec<AnalysisWarning> {
        let positions: HashMap<&str, usize> = ranked
            .iter()
            .enumerate()
            .map(|(position, item)| (item.product_id(), position))
            .collect();

        let mut warnings = Vec::new();

        for row in &allocation.rows {
            let Some(&position) = positions.get(row.product_id.as_str()) else {
                continue;
            };
            let item = &ranked[position];
            let product_id = row.product_id.clone();

            if item.unit_throughput < Decimal::ZERO && row.allocated_units > 0.0 {
                warnings.push(AnalysisWarning::error(
                    product_id.clone(),
                    format!(
                        "單位產銷貢獻為負 ({})，分配 {} 單位將降低總產銷貢獻",
                        item.unit_throughput, row.allocated_units
                    ),
                ));
            } else if item.unit_throughput <= Decimal::ZERO {
                warnings.push(AnalysisWarning::warning(
                    product_id.clone(),
                    format!("單位產銷貢獻非正值: {}", item.unit_throughput),
                ));
            }

            if !row.is_fully_served() && row.allocated_units == 0.0 {
                warnings.push(AnalysisWarning::warning(
                    product_id.clone(),
                    format!("產能不足，未分配任何單位（未滿足需求 {}）", row.unmet_demand()),
                ));
            }

            if let Some(planned) = allocation.provisional.as_ref().and_then(|p| p.units.get(position)) {
                if row.allocated_units < *planned {
                    warnings.push(AnalysisWarning::info(
                        product_id,
                        format!(
                            "次要資源限制：由 {} 單位降為 {} 單位",
                            planned, row.allocated_units
                        ),
                    ));
                }
            }
        }

        for warning in &warnings {
            tracing::debug!("{:?} [{}] {}", warning.severity, warning.product_id, warning.message);
        }

        warnings
    }
}

impl Default for TocOptimizer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
