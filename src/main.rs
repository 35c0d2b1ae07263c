use anyhow::Result;
use clap::Parser;

// パイプラインAPIをインポート
use fanout_pipeline::{
    ConsoleProgressReporter, DefaultPipelineConfig, FanoutEngine, FnTransform, PipelineConfig,
};

/// ファンアウト/ファンイン並列パイプライン デモ
#[derive(Parser)]
#[command(name = "fanout_pipeline")]
#[command(about = "A fan-out / fan-in concurrent pipeline demo")]
#[command(version)]
struct Cli {
    /// Number of parallel worker lanes
    #[arg(short, long, default_value = "4")]
    concurrency: usize,

    /// Number of input items (processes 1..=count)
    #[arg(short = 'n', long, default_value = "11")]
    count: i64,

    /// Suppress per-item trace and progress output
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON
    #[arg(short, long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.quiet {
        println!("🚀 ファンアウト/ファンイン並列パイプライン デモ");
    }

    // 1. 入力データと変換の構築
    let items: Vec<i64> = (1..=cli.count).collect();
    let trace = !cli.quiet;
    let transform = FnTransform::named("times_ten", move |x: i64| {
        let s = (x * 10).to_string();
        if trace {
            println!("⚙️  executing f({x})={s}");
        }
        s
    });

    // 2. エンジン構築
    let engine = FanoutEngine::new(
        transform,
        DefaultPipelineConfig::default()
            .with_concurrency(cli.concurrency) // 並列レーン数
            .with_progress_reporting(false), // シンクを自前で駆動するため進捗報告は不要
        ConsoleProgressReporter::quiet(),
    );

    if !cli.quiet {
        println!("⚙️  設定:");
        println!("   - 並列レーン数: {}", engine.config().concurrency());
        println!("   - レーンバッファ: {}", engine.config().lane_buffer_size());
    }

    // 3. 実行: マージ済みストリームをシンクとして消費
    let mut run = engine.run::<i64, String>(items)?;
    while let Some(result) = run.recv().await {
        if !cli.quiet {
            println!("a  {result}");
        }
    }
    let summary = run.finish().await?;

    // 4. 結果報告
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n✅ 処理完了!");
        println!("📊 処理結果:");
        println!("   - 入力アイテム数: {}", summary.total_items);
        println!("   - マージ済み: {}", summary.merged_items);
        println!("   - 破棄: {}", summary.dropped_items);
        println!("   - 総処理時間: {}ms", summary.total_time_ms);
        println!(
            "   - 平均処理時間: {:.2}ms/アイテム",
            summary.average_time_per_item_ms
        );
    }

    Ok(())
}
