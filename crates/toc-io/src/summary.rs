//! 文字摘要輸出

use std::path::Path;

use toc_core::AllocationRow;
use toc_optimizer::TocResult;

use crate::Result;

const SEPARATOR: &str = "---------------------------------------------------";

/// 產生文字摘要
///
/// `source` 為輸入資料集的標籤（通常是檔案路徑）。
pub fn render_summary(result: &TocResult, source: &str) -> String {
    let summary = &result.summary;
    let reference = summary.reference_resource_id.as_deref().unwrap_or("none");
    let mut out = String::new();

    out.push_str("*** TOC 產品組合最佳化結果 ***\n");
    out.push_str(&format!("輸入資料: {}\n", source));
    out.push_str(&format!("分析批次: {}\n", result.run_id));
    out.push_str(SEPARATOR);
    out.push('\n');

    if summary.has_bottleneck() {
        out.push_str(&format!("全域限制（瓶頸）: {}\n", summary.bottleneck_label()));
        out.push_str(&format!("限制資源產能: {:.2}\n", summary.reference_capacity));
        out.push_str(&format!("原始負荷係數: {:.2}\n", summary.max_load_factor));
        out.push_str(&format!("限制資源剩餘產能: {:.2}\n\n", summary.residual_capacity));
        out.push_str(
            "遷就指示：所有非限制資源應將產出限制在下表的最佳組合，避免在制品堆積（鼓-緩衝-繩）。\n\n",
        );
    } else {
        out.push_str(&format!(
            "沒有產能限制！（最大負荷: {:.2}）\n",
            summary.max_load_factor
        ));
        out.push_str(&format!(
            "負荷最高的資源 ({}) 剩餘產能: {:.2}\n\n",
            reference, summary.residual_capacity
        ));
        out.push_str("指示：生產全部需求，專注於降低營運費用或提高需求。\n\n");
    }

    out.push_str(&format!("最大總產銷貢獻: {:.2}\n", summary.total_throughput));
    out.push_str(&format!("總營運費用: {:.2}\n", summary.total_operating_expense));
    out.push_str(&format!("淨利: {:.2}\n\n", summary.net_profit));

    out.push_str("最佳產品組合:\n");
    out.push_str(&render_table(&result.rows));

    if !result.warnings.is_empty() {
        out.push_str("\n警告:\n");
        for warning in &result.warnings {
            out.push_str(&format!(
                "  [{:?}] {}: {}\n",
                warning.severity, warning.product_id, warning.message
            ));
        }
    }

    out
}

/// 將摘要寫入檔案
pub fn save_summary<P: AsRef<Path>>(path: P, result: &TocResult, source: &str) -> Result<()> {
    std::fs::write(path.as_ref(), render_summary(result, source))?;
    tracing::info!("摘要已輸出: {}", path.as_ref().display());
    Ok(())
}

fn render_table(rows: &[AllocationRow]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.product_id.chars().count())
        .chain(std::iter::once("Product".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:<w$}  {:>14}  {:>10}  {:>18}  {:>20}\n",
        "Product",
        "Priority (T/C)",
        "Demand",
        "Optimal Production",
        "Generated Throughput",
        w = name_width
    );

    for row in rows {
        out.push_str(&format!(
            "{:<w$}  {:>14.2}  {:>10.2}  {:>18.2}  {:>20}\n",
            row.product_id,
            row.priority_ratio,
            row.demand,
            row.allocated_units,
            format!("{:.2}", row.generated_throughput),
            w = name_width
        ));
    }

    out
}
