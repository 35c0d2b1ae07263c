// FanoutEngine - 依存性注入によるパイプラインエンジン
// 全ての依存関係がコンストラクタで注入されるDIパターン実装

use super::pipeline::{FanoutPipeline, PipelineRun};
use crate::core::{PipelineConfig, PipelineError, PipelineResult, PipelineSummary, ProgressReporter};
use crate::transform::TransformBackend;
use std::sync::Arc;

/// 依存性注入によるパイプラインエンジン
///
/// 変換・設定・進捗報告の全てをコンストラクタで注入する。
/// 並列実行で共有される依存関係はArcで管理し、不要なクローンを避ける。
pub struct FanoutEngine<F, C, Rep> {
    transform: Arc<F>,
    config: Arc<C>,
    reporter: Arc<Rep>,
}

impl<F, C, Rep> FanoutEngine<F, C, Rep>
where
    C: PipelineConfig,
    Rep: ProgressReporter + 'static,
{
    /// 新しいエンジンを作成（Constructor Injection）
    pub fn new(transform: F, config: C, reporter: Rep) -> Self {
        Self {
            transform: Arc::new(transform),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        }
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &Rep {
        &self.reporter
    }

    /// 設定検証 - 不正な設定ではタスクを一つも起動しない
    fn validate_config(&self) -> PipelineResult<()> {
        if self.config.concurrency() == 0 {
            return Err(PipelineError::configuration(
                "並列レーン数は1以上である必要があります",
            ));
        }

        if self.config.lane_buffer_size() == 0 {
            return Err(PipelineError::configuration(
                "レーンバッファサイズは1以上である必要があります",
            ));
        }

        Ok(())
    }

    /// パイプラインを起動し、実行ハンドルを返す
    ///
    /// シンクを呼び出し側で駆動する場合の細かい制御用API
    pub fn run<T, R>(&self, items: Vec<T>) -> PipelineResult<PipelineRun<R>>
    where
        T: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: TransformBackend<T, R> + 'static,
    {
        self.validate_config()?;

        let pipeline = FanoutPipeline::new(Arc::clone(&self.transform));
        pipeline.execute(items, self.config.as_ref())
    }

    /// 全出力を収集して返す高レベルAPI
    ///
    /// 統合ストリームを終端まで消費し、結果とサマリーを返す。
    /// 出力順序は非決定的（レーン間の順序保証はない）。
    pub async fn collect<T, R>(&self, items: Vec<T>) -> PipelineResult<(Vec<R>, PipelineSummary)>
    where
        T: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: TransformBackend<T, R> + 'static,
    {
        let total_items = items.len();
        let reporting = self.config.enable_progress_reporting();

        if reporting {
            self.reporter.report_started(total_items).await;
        }

        let mut run = self.run(items)?;

        let mut results = Vec::with_capacity(total_items);
        while let Some(item) = run.recv().await {
            results.push(item);

            if reporting {
                self.reporter.report_progress(results.len(), total_items).await;
            }
        }

        let summary = run.finish().await?;

        if reporting {
            if summary.dropped_items > 0 {
                self.reporter.report_dropped(summary.dropped_items).await;
            }
            self.reporter
                .report_completed(summary.merged_items, summary.dropped_items)
                .await;
        }

        Ok((results, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{DefaultPipelineConfig, NoOpProgressReporter};
    use crate::transform::FnTransform;
    use std::collections::HashSet;

    fn quiet_engine(
        concurrency: usize,
    ) -> FanoutEngine<FnTransform<fn(i64) -> String>, DefaultPipelineConfig, NoOpProgressReporter>
    {
        fn times_ten(x: i64) -> String {
            (x * 10).to_string()
        }

        FanoutEngine::new(
            FnTransform::new(times_ten as fn(i64) -> String),
            DefaultPipelineConfig::default().with_concurrency(concurrency),
            NoOpProgressReporter::new(),
        )
    }

    #[tokio::test]
    async fn test_engine_collect_all_items() {
        let engine = quiet_engine(4);

        let (results, summary) = engine.collect::<i64, String>((1..=11).collect()).await.unwrap();

        assert_eq!(results.len(), 11);
        assert_eq!(summary.total_items, 11);
        assert_eq!(summary.merged_items, 11);
        assert_eq!(summary.dropped_items, 0);

        let unique: HashSet<&String> = results.iter().collect();
        assert_eq!(unique.len(), 11);
    }

    #[tokio::test]
    async fn test_engine_collect_empty_input() {
        let engine = quiet_engine(4);

        let (results, summary) = engine.collect::<i64, String>(vec![]).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.merged_items, 0);
    }

    #[tokio::test]
    async fn test_engine_rejects_invalid_concurrency() {
        let engine = quiet_engine(0);

        let result = engine.run::<i64, String>(vec![1, 2, 3]);
        assert!(matches!(
            result,
            Err(PipelineError::ConfigurationError { .. })
        ));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("並列レーン数は1以上である必要があります"));
    }

    #[tokio::test]
    async fn test_engine_more_lanes_than_items() {
        let engine = quiet_engine(8);

        let (results, summary) = engine.collect::<i64, String>(vec![1, 2, 3]).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(summary.merged_items, 3);
    }

    #[tokio::test]
    async fn test_engine_reports_progress() {
        use crate::core::traits::MockProgressReporter;

        fn identity(x: i64) -> i64 {
            x
        }

        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report_started()
            .withf(|total| *total == 5)
            .times(1)
            .return_const(());
        reporter.expect_report_progress().times(5).return_const(());
        reporter.expect_report_dropped().never();
        reporter
            .expect_report_completed()
            .withf(|merged, dropped| *merged == 5 && *dropped == 0)
            .times(1)
            .return_const(());

        let engine = FanoutEngine::new(
            FnTransform::new(identity as fn(i64) -> i64),
            DefaultPipelineConfig::default().with_concurrency(2),
            reporter,
        );

        let (results, _summary) = engine.collect::<i64, i64>((1..=5).collect()).await.unwrap();
        assert_eq!(results.len(), 5);
    }
}
