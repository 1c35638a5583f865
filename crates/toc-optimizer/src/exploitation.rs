//! 第一階段：開發瓶頸（Exploitation）
//!
//! 只考慮瓶頸資源，依優先級順序分配瓶頸產能，產生暫定分配。

use toc_calc::RankedProduct;
use toc_core::numeric::units_within;

/// 暫定分配（與排序順序對齊，不可變）
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalAllocation {
    /// 各產品暫定單位數（排序順序）
    pub units: Vec<f64>,

    /// 第一階段後瓶頸剩餘產能
    pub remaining_bottleneck_capacity: f64,
}

/// 瓶頸開發計算器
pub struct ExploitationPass;

impl ExploitationPass {
    /// 依優先級分配瓶頸產能
    ///
    /// - C > 0：min(需求, floor(剩餘瓶頸產能 / C))，並扣減瓶頸產能
    /// - C == 0：分配全部需求（此階段不受瓶頸限制）
    pub fn run(ranked: &[RankedProduct<'_>], bottleneck_capacity: f64) -> ProvisionalAllocation {
        let mut remaining = bottleneck_capacity;
        let mut units = Vec::with_capacity(ranked.len());

        for item in ranked {
            let demand = item.product.demand;
            let allocated = if item.consumes_bottleneck() {
                let allocated = demand.min(units_within(remaining, item.bottleneck_time));
                remaining -= allocated * item.bottleneck_time;
                allocated
            } else {
                demand
            };

            tracing::debug!(
                "開發瓶頸: 產品 {} 暫定 {} 單位 (瓶頸剩餘 {:.2})",
                item.product_id(),
                allocated,
                remaining
            );

            units.push(allocated);
        }

        ProvisionalAllocation {
            units,
            remaining_bottleneck_capacity: remaining,
        }
    }
}
