//! 分配表 CSV 輸出

use std::fs::File;
use std::io::Write;
use std::path::Path;

use toc_core::AllocationRow;

use crate::Result;

const HEADERS: [&str; 5] = [
    "Product",
    "Priority (T/C)",
    "Demand",
    "Optimal Production",
    "Generated Throughput",
];

/// 寫出分配表（數值保留兩位小數，排序順序）
pub fn write_allocation_csv<W: Write>(writer: W, rows: &[AllocationRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for row in rows {
        csv_writer.write_record([
            row.product_id.clone(),
            format!("{:.2}", row.priority_ratio),
            format!("{:.2}", row.demand),
            format!("{:.2}", row.allocated_units),
            format!("{:.2}", row.generated_throughput),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 將分配表寫入檔案
pub fn save_allocation_csv<P: AsRef<Path>>(path: P, rows: &[AllocationRow]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_allocation_csv(file, rows)?;
    tracing::info!("分配表已輸出: {}", path.as_ref().display());
    Ok(())
}
