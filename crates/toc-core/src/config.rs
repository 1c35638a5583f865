//! 分析配置

use serde::{Deserialize, Serialize};

/// 預設瓶頸門檻：負荷係數嚴格大於 1.0 才視為瓶頸
pub const DEFAULT_BOTTLENECK_THRESHOLD: f64 = 1.0;

/// 預設產能容差（相對於資源產能，產能小於 1 時以 1 計）
pub const DEFAULT_CAPACITY_TOLERANCE: f64 = 1e-9;

/// TOC 分析參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 瓶頸門檻（最大負荷係數 > 門檻時視為受限系統）
    pub bottleneck_threshold: f64,

    /// 相對產能容差，用於可行性檢查
    pub capacity_tolerance: f64,

    /// 是否以 rayon 並行計算資源負荷與產品優先級
    pub parallel: bool,
}

impl AnalysisConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            bottleneck_threshold: DEFAULT_BOTTLENECK_THRESHOLD,
            capacity_tolerance: DEFAULT_CAPACITY_TOLERANCE,
            parallel: true,
        }
    }

    /// 建構器模式：設置瓶頸門檻
    pub fn with_bottleneck_threshold(mut self, threshold: f64) -> Self {
        self.bottleneck_threshold = threshold;
        self
    }

    /// 建構器模式：設置產能容差
    pub fn with_capacity_tolerance(mut self, tolerance: f64) -> Self {
        self.capacity_tolerance = tolerance.abs();
        self
    }

    /// 建構器模式：設置是否並行計算
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 判斷負荷係數是否構成瓶頸
    pub fn is_bottleneck_load(&self, load_factor: f64) -> bool {
        load_factor > self.bottleneck_threshold
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
