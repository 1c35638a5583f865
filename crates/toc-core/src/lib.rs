//! # TOC Core
//!
//! 限制理論（TOC）產品組合分析的核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod expense;
pub mod numeric;
pub mod plan;
pub mod product;
pub mod resource;

// Re-export 主要類型
pub use catalog::{Catalog, Dataset, DatasetInfo};
pub use config::AnalysisConfig;
pub use expense::{ExpenseEntry, OperatingExpenses};
pub use plan::{AllocationRow, AnalysisSummary};
pub use product::Product;
pub use resource::{Resource, WorkingCapacity};

/// TOC 分析錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    #[error("資源 {resource_id} 的產能必須大於零，無法計算負荷係數")]
    ZeroCapacity { resource_id: String },

    #[error("產品 {product_id} 引用了未定義的資源: {resource_id}")]
    UnknownResourceReference {
        product_id: String,
        resource_id: String,
    },

    #[error("營運費用項目 {label} 格式錯誤: {reason}")]
    MalformedExpenseEntry { label: String, reason: String },

    #[error("無效的輸入資料: {0}")]
    InvalidInput(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, TocError>;
