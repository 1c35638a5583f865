//! 產能分配器（開發瓶頸 → 遷就瓶頸）

use toc_calc::{LoadAnalysis, RankedProduct};
use toc_core::numeric::units_to_decimal;
use toc_core::{AllocationRow, AnalysisConfig, Resource, Result, TocError};

use crate::exploitation::{ExploitationPass, ProvisionalAllocation};
use crate::subordination::SubordinationPass;

/// 分配結果
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// 分配表（排序順序）
    pub rows: Vec<AllocationRow>,

    /// 參考資源剩餘產能
    pub residual_capacity: f64,

    /// 第一階段暫定分配（無瓶頸時為 None）
    pub provisional: Option<ProvisionalAllocation>,
}

/// 產能分配器
pub struct CapacityAllocator;

impl CapacityAllocator {
    /// 執行分配
    ///
    /// 無瓶頸時每個產品分配全部需求；否則依序執行開發與遷就兩階段。
    pub fn allocate(
        ranked: &[RankedProduct<'_>],
        analysis: &LoadAnalysis,
        resources: &[Resource],
        config: &AnalysisConfig,
    ) -> Result<Allocation> {
        let bottleneck = match analysis.bottleneck_id().and_then(|id| analysis.load(id)) {
            Some(load) => load,
            None => return Self::allocate_unconstrained(ranked, analysis),
        };

        tracing::debug!("第一階段: 開發瓶頸 {}", bottleneck.resource_id);
        let provisional = ExploitationPass::run(ranked, bottleneck.capacity);

        tracing::debug!("第二階段: 遷就所有資源");
        let subordinated = SubordinationPass::run(ranked, &provisional, resources)?;

        if let Some(over) = subordinated.over_committed(config.capacity_tolerance).next() {
            return Err(TocError::CalculationError(format!(
                "資源 {} 超額分配: 佔用 {} > 產能 {}",
                over.resource_id,
                over.consumed(),
                over.capacity
            )));
        }

        let residual_capacity = subordinated
            .capacity(&bottleneck.resource_id)
            .map(|c| c.remaining())
            .unwrap_or(0.0);

        let rows = ranked
            .iter()
            .zip(&subordinated.units)
            .map(|(item, &units)| Self::row(item, units))
            .collect::<Result<Vec<_>>>()?;

        Ok(Allocation {
            rows,
            residual_capacity,
            provisional: Some(provisional),
        })
    }

    /// 無限制情況：全部需求，分配表維持目錄順序
    ///
    /// 剩餘產能 = 參考資源產能 - 原始耗用。
    fn allocate_unconstrained(
        ranked: &[RankedProduct<'_>],
        analysis: &LoadAnalysis,
    ) -> Result<Allocation> {
        let mut in_catalog_order: Vec<&RankedProduct<'_>> = ranked.iter().collect();
        in_catalog_order.sort_by_key(|item| item.catalog_index);

        let rows = in_catalog_order
            .into_iter()
            .map(|item| Self::row(item, item.product.demand))
            .collect::<Result<Vec<_>>>()?;

        let residual_capacity = analysis
            .reference()
            .map(|load| load.spare_capacity())
            .unwrap_or(0.0);

        Ok(Allocation {
            rows,
            residual_capacity,
            provisional: None,
        })
    }

    fn row(item: &RankedProduct<'_>, units: f64) -> Result<AllocationRow> {
        let generated_throughput = units_to_decimal(units)? * item.unit_throughput;

        Ok(AllocationRow::new(
            item.product.product_id.clone(),
            item.priority_ratio,
            item.product.demand,
            units,
            generated_throughput,
        ))
    }
}
