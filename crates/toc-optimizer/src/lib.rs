//! # TOC Optimizer
//!
//! 兩階段產能分配（開發瓶頸、遷就瓶頸）與財務彙總

pub mod allocator;
pub mod exploitation;
pub mod financial;
pub mod optimizer;
pub mod subordination;

// Re-export 主要類型
pub use allocator::{Allocation, CapacityAllocator};
pub use exploitation::{ExploitationPass, ProvisionalAllocation};
pub use financial::{FinancialSummarizer, FinancialSummary};
pub use optimizer::TocOptimizer;
pub use subordination::{SubordinatedAllocation, SubordinationPass};

use toc_calc::LoadAnalysis;
use toc_core::{AllocationRow, AnalysisSummary};

/// TOC 分析結果
#[derive(Debug, Clone)]
pub struct TocResult {
    /// 分析批次ID
    pub run_id: uuid::Uuid,

    /// 分配表（排序順序）
    pub rows: Vec<AllocationRow>,

    /// 分析摘要
    pub summary: AnalysisSummary,

    /// 資源負荷分析
    pub loads: LoadAnalysis,

    /// 警告信息
    pub warnings: Vec<AnalysisWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl TocResult {
    /// 依產品ID查找分配列
    pub fn row(&self, product_id: &str) -> Option<&AllocationRow> {
        self.rows.iter().find(|r| r.product_id == product_id)
    }
}

/// 分析警告
#[derive(Debug, Clone)]
pub struct AnalysisWarning {
    pub product_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl AnalysisWarning {
    pub fn new(product_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Info)
    }

    pub fn warning(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Warning)
    }

    pub fn error(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
