//! 資源負荷分析（瓶頸識別）

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use toc_core::{AnalysisConfig, Catalog, Product, Resource, Result, TocError};

/// 單一資源的負荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoad {
    /// 資源ID
    pub resource_id: String,
    /// 產能
    pub capacity: f64,
    /// 原始耗用（Σ 需求 × 單位耗用時間）
    pub consumption: f64,
    /// 負荷係數（耗用 / 產能）
    pub load_factor: f64,
}

impl ResourceLoad {
    /// 未分配前的剩餘產能（可為負值）
    pub fn spare_capacity(&self) -> f64 {
        self.capacity - self.consumption
    }
}

/// 負荷分析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadAnalysis {
    /// 各資源負荷（目錄順序）
    pub loads: Vec<ResourceLoad>,

    /// 負荷最高的資源（平手時先出現者優先）
    pub reference_resource_id: Option<String>,

    /// 最大負荷係數
    pub max_load_factor: f64,

    /// 最大負荷係數是否超過瓶頸門檻
    pub has_bottleneck: bool,
}

impl LoadAnalysis {
    /// 瓶頸資源ID（僅在受限系統時存在）
    pub fn bottleneck_id(&self) -> Option<&str> {
        if self.has_bottleneck {
            self.reference_resource_id.as_deref()
        } else {
            None
        }
    }

    /// 參考資源的負荷
    pub fn reference(&self) -> Option<&ResourceLoad> {
        let id = self.reference_resource_id.as_deref()?;
        self.load(id)
    }

    /// 依ID查找資源負荷
    pub fn load(&self, resource_id: &str) -> Option<&ResourceLoad> {
        self.loads.iter().find(|l| l.resource_id == resource_id)
    }

    /// 指定資源的原始耗用
    pub fn consumption(&self, resource_id: &str) -> Option<f64> {
        self.load(resource_id).map(|l| l.consumption)
    }

    /// 指定資源的負荷係數
    pub fn load_factor(&self, resource_id: &str) -> Option<f64> {
        self.load(resource_id).map(|l| l.load_factor)
    }
}

/// 資源負荷分析器
pub struct ResourceLoadAnalyzer;

impl ResourceLoadAnalyzer {
    /// 計算各資源耗用與負荷係數，並識別瓶頸
    pub fn analyze(catalog: &Catalog, config: &AnalysisConfig) -> Result<LoadAnalysis> {
        Self::check_references(catalog)?;

        let loads: Vec<ResourceLoad> = if config.parallel {
            catalog
                .resources
                .par_iter()
                .map(|r| Self::resource_load(r, &catalog.products))
                .collect::<Result<Vec<_>>>()?
        } else {
            catalog
                .resources
                .iter()
                .map(|r| Self::resource_load(r, &catalog.products))
                .collect::<Result<Vec<_>>>()?
        };

        // 嚴格大於才替換，平手時保留目錄中先出現的資源
        let mut reference: Option<&ResourceLoad> = None;
        for load in &loads {
            if reference.map_or(true, |best| load.load_factor > best.load_factor) {
                reference = Some(load);
            }
        }

        let max_load_factor = reference.map(|l| l.load_factor).unwrap_or(0.0);
        let has_bottleneck = reference.is_some() && config.is_bottleneck_load(max_load_factor);

        match reference {
            Some(load) if has_bottleneck => tracing::info!(
                "識別瓶頸資源: {} (負荷係數 {:.2})",
                load.resource_id,
                load.load_factor
            ),
            Some(load) => tracing::info!(
                "無產能限制，負荷最高資源: {} (負荷係數 {:.2})",
                load.resource_id,
                load.load_factor
            ),
            None => tracing::warn!("目錄中沒有任何資源"),
        }

        Ok(LoadAnalysis {
            reference_resource_id: reference.map(|l| l.resource_id.clone()),
            loads,
            max_load_factor,
            has_bottleneck,
        })
    }

    /// 單一資源的耗用與負荷係數
    fn resource_load(resource: &Resource, products: &[Product]) -> Result<ResourceLoad> {
        let consumption = products
            .iter()
            .map(|p| p.demand * p.time_on(&resource.resource_id))
            .sum::<f64>();
        let load_factor = resource.load_factor(consumption)?;

        tracing::debug!(
            "資源 {} 耗用 {:.2} / 產能 {:.2} (負荷 {:.2})",
            resource.resource_id,
            consumption,
            resource.capacity,
            load_factor
        );

        Ok(ResourceLoad {
            resource_id: resource.resource_id.clone(),
            capacity: resource.capacity,
            consumption,
            load_factor,
        })
    }

    /// 產品引用的資源必須已定義
    fn check_references(catalog: &Catalog) -> Result<()> {
        let known: HashSet<&str> = catalog
            .resources
            .iter()
            .map(|r| r.resource_id.as_str())
            .collect();

        for product in &catalog.products {
            if let Some(unknown) = product
                .resource_usage
                .keys()
                .find(|id| !known.contains(id.as_str()))
            {
                return Err(TocError::UnknownResourceReference {
                    product_id: product.product_id.clone(),
                    resource_id: unknown.clone(),
                });
            }
        }

        Ok(())
    }
}
