// 進捗監視の具象実装

use crate::core::ProgressReporter;
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_items: usize) {
        if !self.quiet {
            println!("🚀 Starting pipeline with {total_items} items...");
        }
    }

    async fn report_progress(&self, merged: usize, total: usize) {
        if !self.quiet && total > 0 && (merged % 10 == 0 || merged == total) {
            let percentage = (merged as f64 / total as f64) * 100.0;
            println!("📊 Progress: {merged}/{total} ({percentage:.1}%)");
        }
    }

    async fn report_dropped(&self, dropped: usize) {
        if !self.quiet {
            eprintln!("⚠️  {dropped} items dropped by cancellation");
        }
    }

    async fn report_completed(&self, total_merged: usize, total_dropped: usize) {
        if !self.quiet {
            println!("✅ Completed! Merged: {total_merged}, Dropped: {total_dropped}");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_items: usize) {
        // 何もしない
    }

    async fn report_progress(&self, _merged: usize, _total: usize) {
        // 何もしない
    }

    async fn report_dropped(&self, _dropped: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _total_merged: usize, _total_dropped: usize) {
        // 何もしない
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_progress_reporter() {
        // 出力キャプチャは複雑なため、基本的な呼び出しテストのみ
        let reporter = ConsoleProgressReporter::quiet(); // quiet modeでテスト

        reporter.report_started(11).await;
        reporter.report_progress(5, 11).await;
        reporter.report_dropped(2).await;
        reporter.report_completed(9, 2).await;
    }

    #[tokio::test]
    async fn test_console_progress_reporter_creation() {
        let reporter1 = ConsoleProgressReporter::new();
        let reporter2 = ConsoleProgressReporter::quiet();

        assert!(!reporter1.quiet);
        assert!(reporter2.quiet);
    }

    #[tokio::test]
    async fn test_noop_progress_reporter() {
        let reporter = NoOpProgressReporter::new();

        // 全てのメソッドを呼び出してもパニックしない
        reporter.report_started(11).await;
        reporter.report_progress(5, 11).await;
        reporter.report_dropped(0).await;
        reporter.report_completed(11, 0).await;
    }
}
