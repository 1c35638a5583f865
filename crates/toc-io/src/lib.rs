//! # TOC IO
//!
//! 資料集載入與報表輸出（CSV、文字摘要、流程圖）

use std::path::PathBuf;

pub mod csv_report;
pub mod graph;
pub mod loader;
pub mod output;
pub mod summary;

// Re-export 主要類型
pub use csv_report::{save_allocation_csv, write_allocation_csv};
pub use graph::{GraphNode, ProcessGraph};
pub use loader::{load_dataset, parse_dataset};
pub use output::OutputLayout;
pub use summary::{render_summary, save_summary};

/// 載入與輸出錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("找不到檔案: {}", .0.display())]
    NotFound(PathBuf),

    #[error("檔案讀寫失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML 解析失敗: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV 輸出失敗: {0}")]
    Csv(#[from] csv::Error),

    #[error("資料集缺少必要區段: {}", .0.join(", "))]
    MissingSections(Vec<String>),

    #[error("資料集格式錯誤: {0}")]
    InvalidDataset(String),

    #[error(transparent)]
    Analysis(#[from] toc_core::TocError),
}

pub type Result<T> = std::result::Result<T, IoError>;
