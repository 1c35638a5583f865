//! # TOC Calculation Engine
//!
//! 資源負荷分析與產品優先級排序

pub mod load;
pub mod ranking;

// Re-export 主要類型
pub use load::{LoadAnalysis, ResourceLoad, ResourceLoadAnalyzer};
pub use ranking::{PriorityRanker, RankedProduct};
