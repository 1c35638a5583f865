//! # TOC
//!
//! 限制理論產品組合分析：載入資料集 → 瓶頸分析 → 兩階段分配 → 報表輸出

pub mod logging;

use std::path::{Path, PathBuf};

use anyhow::Context;

pub use toc_core::config;
pub use toc_calc::{LoadAnalysis, PriorityRanker, ResourceLoadAnalyzer};
pub use toc_core::{
    AllocationRow, AnalysisConfig, AnalysisSummary, Catalog, Dataset, DatasetInfo,
    OperatingExpenses, Product, Resource, TocError,
};
pub use toc_io::{load_dataset, OutputLayout, ProcessGraph};
pub use toc_optimizer::{TocOptimizer, TocResult};

/// 一次完整分析的結果與輸出位置
#[derive(Debug)]
pub struct AnalysisRun {
    pub dataset: Dataset,
    pub result: TocResult,
    pub layout: OutputLayout,
    /// 流程圖是否成功輸出
    pub graph_written: bool,
}

/// 執行完整分析並輸出報表
///
/// 分析或 CSV/摘要輸出失敗即中止；流程圖失敗只記錄警告。
pub fn run_analysis(
    dataset_path: &Path,
    output_base: Option<&Path>,
    config: AnalysisConfig,
) -> anyhow::Result<AnalysisRun> {
    let dataset = load_dataset(dataset_path)
        .with_context(|| format!("無法讀取資料集 {}", dataset_path.display()))?;

    let layout = OutputLayout::new(output_base, &dataset.info);
    layout
        .prepare()
        .with_context(|| format!("無法建立輸出目錄 {}", layout.dir.display()))?;

    let result = TocOptimizer::new(config)
        .optimize(&dataset.catalog)
        .context("TOC 分析失敗")?;

    let source = dataset_path.display().to_string();
    toc_io::save_allocation_csv(&layout.csv_path, &result.rows).context("無法輸出分配表")?;
    toc_io::save_summary(&layout.summary_path, &result, &source).context("無法輸出摘要")?;

    let graph_written = match ProcessGraph::build(&dataset.catalog, &result.loads)
        .and_then(|graph| graph.save_dot(&layout.graph_path))
    {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("流程圖輸出失敗: {}", e);
            false
        }
    };

    Ok(AnalysisRun {
        dataset,
        result,
        layout,
        graph_written,
    })
}

/// 已輸出的檔案
pub fn written_files(run: &AnalysisRun) -> Vec<PathBuf> {
    let mut files = vec![run.layout.csv_path.clone(), run.layout.summary_path.clone()];
    if run.graph_written {
        files.push(run.layout.graph_path.clone());
    }
    files
}
