//! 輸出目錄與檔名配置

use std::path::{Path, PathBuf};

use toc_core::DatasetInfo;

use crate::Result;

/// 每家公司一個輸出目錄，檔名以分析日期為前綴
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub csv_path: PathBuf,
    pub summary_path: PathBuf,
    pub graph_path: PathBuf,
}

impl OutputLayout {
    /// 依資料集資訊建立輸出配置（目錄名稱為公司名稱，空白改為底線）
    pub fn new(base: Option<&Path>, info: &DatasetInfo) -> Self {
        let dir_name = info.company.trim().replace(' ', "_");
        let dir = match base {
            Some(base) => base.join(dir_name),
            None => PathBuf::from(dir_name),
        };
        let date = info.date.format("%Y-%m-%d").to_string();

        Self {
            csv_path: dir.join(format!("{}_toc_results.csv", date)),
            summary_path: dir.join(format!("{}_summary.txt", date)),
            graph_path: dir.join(format!("{}_toc_diagram.dot", date)),
            dir,
        }
    }

    /// 建立輸出目錄（已存在時檔案將被覆寫）
    pub fn prepare(&self) -> Result<()> {
        if self.dir.exists() {
            tracing::warn!("目錄 {} 已存在，檔案將被覆寫", self.dir.display());
        } else {
            std::fs::create_dir_all(&self.dir)?;
            tracing::info!("已建立目錄 {}", self.dir.display());
        }
        Ok(())
    }
}
