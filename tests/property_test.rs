//! 分配不變量的性質測試

use proptest::prelude::*;
use rust_decimal::Decimal;
use toc::{AnalysisConfig, Catalog, Product, Resource, TocError, TocOptimizer, TocResult};

const TOLERANCE: f64 = 1e-9;

/// 產能 1 ~ 1e8（含兩位小數），單位耗用 0.00 ~ 9.99
fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    (1usize..4)
        .prop_flat_map(|resource_count| {
            let capacities = prop::collection::vec((1u32..100_000_000, 0u32..100), resource_count);
            let products = prop::collection::vec(
                (
                    0u32..100,
                    0u32..100,
                    0u32..1_000_000,
                    prop::collection::vec(0u32..1000, resource_count),
                ),
                0..6,
            );
            (capacities, products)
        })
        .prop_map(|(capacities, products)| {
            let resources = capacities
                .into_iter()
                .enumerate()
                .map(|(i, (whole, cents))| {
                    Resource::new(format!("R{}", i), f64::from(whole) + f64::from(cents) / 100.0)
                })
                .collect();

            let products = products
                .into_iter()
                .enumerate()
                .map(|(i, (price, cost, demand, usage))| {
                    usage.into_iter().enumerate().filter(|&(_, t)| t > 0).fold(
                        Product::new(
                            format!("P{}", i),
                            Decimal::from(price),
                            Decimal::from(cost),
                            f64::from(demand),
                        ),
                        |product, (r, t)| product.with_usage(format!("R{}", r), f64::from(t) / 100.0),
                    )
                })
                .collect();

            Catalog::new(resources, products)
        })
}

fn optimize(catalog: &Catalog) -> Result<TocResult, TocError> {
    TocOptimizer::new(AnalysisConfig::default()).optimize(catalog)
}

/// 產品在分配表中的位置（排序順序）
fn position(result: &TocResult, product_id: &str) -> Option<usize> {
    result.rows.iter().position(|r| r.product_id == product_id)
}

proptest! {
    #[test]
    fn prop_valid_catalog_never_fails(catalog in catalog_strategy()) {
        prop_assert!(catalog.validate().is_ok());
        let outcome = optimize(&catalog);
        prop_assert!(outcome.is_ok(), "{:?}", outcome.err());
    }

    #[test]
    fn prop_capacity_never_exceeded(catalog in catalog_strategy()) {
        let result = optimize(&catalog).unwrap();

        for resource in &catalog.resources {
            let used: f64 = result
                .rows
                .iter()
                .map(|row| {
                    let product = catalog.product(&row.product_id).unwrap();
                    row.allocated_units * product.time_on(&resource.resource_id)
                })
                .sum();
            prop_assert!(
                used <= resource.capacity + TOLERANCE * resource.capacity.max(1.0),
                "{} 使用 {} 超過產能 {}",
                resource.resource_id,
                used,
                resource.capacity
            );
        }
    }

    #[test]
    fn prop_allocation_within_demand(catalog in catalog_strategy()) {
        let result = optimize(&catalog).unwrap();

        prop_assert_eq!(result.rows.len(), catalog.products.len());
        for row in &result.rows {
            prop_assert!(row.allocated_units >= 0.0);
            prop_assert!(row.allocated_units <= row.demand);
            prop_assert_eq!(row.allocated_units.fract(), 0.0);
        }
    }

    #[test]
    fn prop_unconstrained_serves_full_demand(catalog in catalog_strategy()) {
        let result = optimize(&catalog).unwrap();

        if !result.summary.has_bottleneck() {
            for row in &result.rows {
                prop_assert_eq!(row.allocated_units, row.demand);
            }
        }
    }

    #[test]
    fn prop_deterministic(catalog in catalog_strategy()) {
        let first = optimize(&catalog).unwrap();
        let second = optimize(&catalog).unwrap();

        prop_assert_eq!(first.rows, second.rows);
        prop_assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn prop_higher_price_never_lowers_priority(
        catalog in catalog_strategy(),
        raise in 1u32..100,
    ) {
        prop_assume!(!catalog.products.is_empty());

        let before = optimize(&catalog).unwrap();

        let mut raised = catalog.clone();
        raised.products[0].price += Decimal::from(raise);
        let after = optimize(&raised).unwrap();

        let old = before.row("P0").unwrap().priority_ratio;
        let new = after.row("P0").unwrap().priority_ratio;
        prop_assert!(new >= old, "優先級由 {} 降為 {}", old, new);
    }

    #[test]
    fn prop_higher_price_never_lowers_own_units(
        catalog in catalog_strategy(),
        raise in 1u32..100,
    ) {
        prop_assume!(!catalog.products.is_empty());

        let before = optimize(&catalog).unwrap();

        let mut raised = catalog.clone();
        raised.products[0].price += Decimal::from(raise);
        let after = optimize(&raised).unwrap();

        // 僅比較排序位置不變或提前的情況
        if before.summary.has_bottleneck() {
            prop_assume!(position(&after, "P0") <= position(&before, "P0"));
        }

        let old = before.row("P0").unwrap().allocated_units;
        let new = after.row("P0").unwrap().allocated_units;
        prop_assert!(new >= old, "分配由 {} 降為 {}", old, new);
    }
}
