//! 第二階段：遷就瓶頸（Subordination）
//!
//! 以全額產能重新走一次排序順序，對每個產品耗用的所有資源檢查可行性，
//! 保證任何資源（含瓶頸）都不會被超額分配。

use std::collections::HashMap;

use toc_calc::RankedProduct;
use toc_core::numeric::units_within;
use toc_core::{Resource, Result, TocError, WorkingCapacity};

use crate::exploitation::ProvisionalAllocation;

/// 最終分配結果
#[derive(Debug, Clone, PartialEq)]
pub struct SubordinatedAllocation {
    /// 各產品最終單位數（排序順序）
    pub units: Vec<f64>,

    /// 各資源工作產能（目錄順序）
    pub capacities: Vec<WorkingCapacity>,
}

impl SubordinatedAllocation {
    /// 依ID查找工作產能
    pub fn capacity(&self, resource_id: &str) -> Option<&WorkingCapacity> {
        self.capacities.iter().find(|c| c.resource_id == resource_id)
    }

    /// 超出產能的資源
    pub fn over_committed(&self, tolerance: f64) -> impl Iterator<Item = &WorkingCapacity> {
        self.capacities
            .iter()
            .filter(move |c| c.is_over_committed(tolerance))
    }
}

/// 遷就計算器
pub struct SubordinationPass;

impl SubordinationPass {
    /// 依優先級逐一檢查所有耗用資源
    ///
    /// 最終單位數 = min(暫定單位數, 各耗用資源 floor(剩餘產能 / 單位耗用))，
    /// 再從每個耗用資源扣減。較早排序的產品先佔用次要資源。
    /// 引用未定義資源時回傳 `UnknownResourceReference`。
    pub fn run(
        ranked: &[RankedProduct<'_>],
        provisional: &ProvisionalAllocation,
        resources: &[Resource],
    ) -> Result<SubordinatedAllocation> {
        let mut working: HashMap<&str, WorkingCapacity> = resources
            .iter()
            .map(|r| (r.resource_id.as_str(), r.working_capacity()))
            .collect();

        let mut units = Vec::with_capacity(ranked.len());

        for (item, &planned) in ranked.iter().zip(&provisional.units) {
            let mut feasible = planned;
            for (id, time) in item.product.consumed_resources() {
                let capacity = working.get(id).ok_or_else(|| unknown(item, id))?;
                feasible = feasible.min(units_within(capacity.remaining(), time));
            }

            for (id, time) in item.product.consumed_resources() {
                let capacity = working.get_mut(id).ok_or_else(|| unknown(item, id))?;
                capacity.consume(feasible * time);
            }

            if feasible < planned {
                tracing::debug!(
                    "遷就: 產品 {} 由 {} 降為 {} 單位",
                    item.product_id(),
                    planned,
                    feasible
                );
            }

            units.push(feasible);
        }

        let capacities = resources
            .iter()
            .filter_map(|r| working.remove(r.resource_id.as_str()))
            .collect();

        Ok(SubordinatedAllocation { units, capacities })
    }
}

fn unknown(item: &RankedProduct<'_>, resource_id: &str) -> TocError {
    TocError::UnknownResourceReference {
        product_id: item.product_id().to_string(),
        resource_id: resource_id.to_string(),
    }
}
