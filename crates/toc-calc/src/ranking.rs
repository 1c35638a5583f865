//! 產品優先級排序（每單位瓶頸耗用的產銷貢獻）

use std::cmp::Ordering;

use rayon::prelude::*;
use rust_decimal::Decimal;
use toc_core::numeric::decimal_to_f64;
use toc_core::{AnalysisConfig, Product, Result};

/// 已排序的產品及其 (T, C, 優先級)
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProduct<'a> {
    /// 產品引用
    pub product: &'a Product,

    /// 目錄中的位置
    pub catalog_index: usize,

    /// 單位產銷貢獻 T
    pub unit_throughput: Decimal,

    /// 單位瓶頸耗用 C
    pub bottleneck_time: f64,

    /// 優先級比率
    pub priority_ratio: f64,
}

impl<'a> RankedProduct<'a> {
    /// 是否耗用瓶頸資源
    pub fn consumes_bottleneck(&self) -> bool {
        self.bottleneck_time > 0.0
    }

    pub fn product_id(&self) -> &str {
        &self.product.product_id
    }
}

/// 產品優先級排序器
pub struct PriorityRanker;

impl PriorityRanker {
    /// 計算優先級並排序
    ///
    /// 排序鍵依序為：優先級遞減、耗用瓶頸者優先、目錄順序。
    pub fn rank<'a>(
        products: &'a [Product],
        bottleneck_id: Option<&str>,
        config: &AnalysisConfig,
    ) -> Result<Vec<RankedProduct<'a>>> {
        let score = |(index, product): (usize, &'a Product)| {
            Self::score(index, product, bottleneck_id)
        };

        let mut ranked: Vec<RankedProduct<'a>> = if config.parallel {
            products
                .par_iter()
                .enumerate()
                .map(score)
                .collect::<Result<Vec<_>>>()?
        } else {
            products
                .iter()
                .enumerate()
                .map(score)
                .collect::<Result<Vec<_>>>()?
        };

        ranked.sort_by(Self::compare);

        tracing::debug!(
            "優先級排序: {:?}",
            ranked
                .iter()
                .map(|r| (r.product_id(), r.priority_ratio))
                .collect::<Vec<_>>()
        );

        Ok(ranked)
    }

    /// 計算單一產品的優先級
    fn score<'a>(
        catalog_index: usize,
        product: &'a Product,
        bottleneck_id: Option<&str>,
    ) -> Result<RankedProduct<'a>> {
        let unit_throughput = product.unit_throughput();
        let bottleneck_time = bottleneck_id.map(|id| product.time_on(id)).unwrap_or(0.0);
        let priority_ratio = Self::priority_ratio(decimal_to_f64(unit_throughput)?, bottleneck_time);

        Ok(RankedProduct {
            product,
            catalog_index,
            unit_throughput,
            bottleneck_time,
            priority_ratio,
        })
    }

    /// 優先級比率
    ///
    /// - C > 0：T / C
    /// - C == 0 且 T > 0：以 T 本身作為代理值
    /// - C == 0 且 T <= 0：0
    pub fn priority_ratio(unit_throughput: f64, bottleneck_time: f64) -> f64 {
        if bottleneck_time > 0.0 {
            unit_throughput / bottleneck_time
        } else if unit_throughput > 0.0 {
            unit_throughput
        } else {
            0.0
        }
    }

    fn compare(a: &RankedProduct<'_>, b: &RankedProduct<'_>) -> Ordering {
        b.priority_ratio
            .partial_cmp(&a.priority_ratio)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.consumes_bottleneck().cmp(&a.consumes_bottleneck()))
            .then_with(|| a.catalog_index.cmp(&b.catalog_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn product(id: &str, price: i64, cost: i64) -> Product {
        Product::new(id, Decimal::from(price), Decimal::from(cost), 10.0)
    }

    fn ids<'a>(ranked: &'a [RankedProduct<'_>]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.product_id()).collect()
    }

    #[rstest]
    #[case(10.0, 2.0, 5.0)]
    #[case(8.0, 0.0, 8.0)]
    #[case(-4.0, 0.0, 0.0)]
    #[case(0.0, 0.0, 0.0)]
    #[case(-4.0, 2.0, -2.0)]
    fn test_priority_ratio(#[case] t: f64, #[case] c: f64, #[case] expected: f64) {
        assert_eq!(PriorityRanker::priority_ratio(t, c), expected);
    }

    #[test]
    fn test_rank_descending_priority() {
        let products = vec![
            product("LOW", 12, 10).with_usage("M", 1.0),
            product("HIGH", 30, 10).with_usage("M", 2.0),
            product("MID", 15, 10).with_usage("M", 1.0),
        ];

        let ranked = PriorityRanker::rank(&products, Some("M"), &AnalysisConfig::default()).unwrap();

        assert_eq!(ids(&ranked), vec!["HIGH", "MID", "LOW"]);
        assert_eq!(ranked[0].priority_ratio, 10.0);
        assert_eq!(ranked[0].unit_throughput, Decimal::from(20));
        assert_eq!(ranked[0].bottleneck_time, 2.0);
        assert_eq!(ranked[0].catalog_index, 1);
    }

    #[test]
    fn test_tie_prefers_bottleneck_consumer() {
        // FREE 不耗用瓶頸，代理值 T=5 與 USER 的 T/C=5 平手
        let products = vec![
            product("FREE", 15, 10),
            product("USER", 20, 10).with_usage("M", 2.0),
        ];

        let ranked = PriorityRanker::rank(&products, Some("M"), &AnalysisConfig::default()).unwrap();
        assert_eq!(ids(&ranked), vec!["USER", "FREE"]);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_tie_keeps_catalog_order(#[case] parallel: bool) {
        let products = vec![
            product("X", 20, 10).with_usage("M", 2.0),
            product("Y", 15, 10).with_usage("M", 1.0),
            product("W", 25, 10).with_usage("M", 3.0),
        ];

        let config = AnalysisConfig::new().with_parallel(parallel);
        let ranked = PriorityRanker::rank(&products, Some("M"), &config).unwrap();
        assert_eq!(ids(&ranked), vec!["X", "Y", "W"]);
    }

    #[test]
    fn test_no_bottleneck_uses_proxy() {
        let products = vec![product("A", 12, 10), product("B", 20, 10), product("C", 5, 10)];

        let ranked = PriorityRanker::rank(&products, None, &AnalysisConfig::default()).unwrap();

        assert_eq!(ids(&ranked), vec!["B", "A", "C"]);
        assert_eq!(ranked[2].priority_ratio, 0.0);
        assert!(ranked.iter().all(|r| !r.consumes_bottleneck()));
    }

    #[test]
    fn test_rank_does_not_mutate_input() {
        let products = vec![product("A", 12, 10), product("B", 20, 10)];
        let before = products.clone();

        let _ = PriorityRanker::rank(&products, None, &AnalysisConfig::default()).unwrap();
        assert_eq!(products, before);
    }
}
