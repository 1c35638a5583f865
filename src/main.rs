//! TOC 產品組合分析工具

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use toc::config::DEFAULT_BOTTLENECK_THRESHOLD;
use toc::AnalysisConfig;

/// 限制理論（TOC）產品組合分析
#[derive(Debug, Parser)]
#[command(name = "toc", version, about)]
struct Cli {
    /// YAML 資料集路徑
    dataset: PathBuf,

    /// 輸出根目錄（預設為目前目錄）
    #[arg(long, env = "TOC_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// 瓶頸門檻（最大負荷係數需嚴格大於此值）
    #[arg(long, env = "TOC_BOTTLENECK_THRESHOLD", default_value_t = DEFAULT_BOTTLENECK_THRESHOLD)]
    threshold: f64,

    /// 停用並行計算
    #[arg(long)]
    sequential: bool,
}

fn main() -> ExitCode {
    toc::logging::init();
    let cli = Cli::parse();

    let config = AnalysisConfig::new()
        .with_bottleneck_threshold(cli.threshold)
        .with_parallel(!cli.sequential);

    match toc::run_analysis(&cli.dataset, cli.output_dir.as_deref(), config) {
        Ok(run) => {
            println!(
                "瓶頸: {}，總產銷貢獻: {:.2}，淨利: {:.2}",
                run.result.summary.bottleneck_label(),
                run.result.summary.total_throughput,
                run.result.summary.net_profit
            );
            println!("結果已輸出至 {}:", run.layout.dir.display());
            for file in toc::written_files(&run) {
                println!("  - {}", file.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("錯誤: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
