// 高レベル公開API
// FanoutEngineを簡単に使用できるようにするための便利な関数

use super::fanout_engine::FanoutEngine;
use crate::core::{PipelineResult, PipelineSummary};
use crate::services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter};
use crate::transform::{FnTransform, TransformBackend};

/// デフォルト設定のエンジンを作成
pub fn create_default_engine<F>(
    transform: F,
) -> FanoutEngine<F, DefaultPipelineConfig, ConsoleProgressReporter> {
    FanoutEngine::new(
        transform,
        DefaultPipelineConfig::default(),
        ConsoleProgressReporter::new(),
    )
}

/// 静音版エンジンを作成（テスト・バックグラウンド処理用）
pub fn create_quiet_engine<F>(
    transform: F,
) -> FanoutEngine<F, DefaultPipelineConfig, NoOpProgressReporter> {
    FanoutEngine::new(
        transform,
        DefaultPipelineConfig::default(),
        NoOpProgressReporter::new(),
    )
}

/// 設定済みエンジンで全アイテムを処理（細かい制御が不要な場合の入口）
pub async fn collect_with_engine<T, R, F, C, Rep>(
    items: Vec<T>,
    engine: &FanoutEngine<F, C, Rep>,
) -> PipelineResult<(Vec<R>, PipelineSummary)>
where
    T: Send + Sync + 'static,
    R: Send + Sync + 'static,
    F: TransformBackend<T, R> + 'static,
    C: crate::core::PipelineConfig,
    Rep: crate::core::ProgressReporter + 'static,
{
    engine.collect(items).await
}

/// クロージャ一つで完結する最小API
///
/// 入力コレクションと並列度と変換関数からマージ済み結果を返す。
/// 出力順序は非決定的。
pub async fn run_fanout<T, R, Func>(
    items: Vec<T>,
    concurrency: usize,
    func: Func,
) -> PipelineResult<Vec<R>>
where
    T: Send + Sync + 'static,
    R: Send + Sync + 'static,
    Func: Fn(T) -> R + Send + Sync + 'static,
{
    let engine = FanoutEngine::new(
        FnTransform::new(func),
        DefaultPipelineConfig::default().with_concurrency(concurrency),
        NoOpProgressReporter::new(),
    );

    let (results, _summary) = engine.collect(items).await?;
    Ok(results)
}
