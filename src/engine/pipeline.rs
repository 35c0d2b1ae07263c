// Pipeline - 5段構成の配線とオーケストレーション
// source → fan-out → workers → merge の構築と実行ハンドルの提供

use super::fanout::{open_lanes, spawn_distributor};
use super::merge::spawn_merger;
use super::source::spawn_source;
use super::worker::spawn_workers;
use crate::core::{
    CancelSignal, CollectorStats, PipelineConfig, PipelineError, PipelineResult, PipelineSummary,
};
use crate::transform::TransformBackend;
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// ファンアウト/ファンインパイプライン
///
/// 変換バックエンドのみを保持し、実行ごとにレーン一式とステージタスクを
/// 新規に構築する。レーンが実行をまたいで再利用されることはない。
pub struct FanoutPipeline<F> {
    transform: Arc<F>,
}

impl<F> FanoutPipeline<F> {
    /// 新しいパイプラインを作成
    pub fn new(transform: Arc<F>) -> Self {
        Self { transform }
    }

    /// パイプラインを起動し、実行ハンドルを返す
    ///
    /// 全レーンはここで構築され、トポロジ（Nレーン入出力）は実行中不変。
    /// 設定が不正な場合はタスクを一つも起動せずに拒否する。
    pub fn execute<T, R, C>(&self, items: Vec<T>, config: &C) -> PipelineResult<PipelineRun<R>>
    where
        T: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: TransformBackend<T, R> + 'static,
        C: PipelineConfig,
    {
        let concurrency = config.concurrency();
        let lane_buffer = config.lane_buffer_size();

        if concurrency == 0 {
            return Err(PipelineError::configuration(
                "並列レーン数は1以上である必要があります",
            ));
        }
        if lane_buffer == 0 {
            return Err(PipelineError::configuration(
                "レーンバッファサイズは1以上である必要があります",
            ));
        }

        let total_items = items.len();
        let started_at = chrono::Utc::now().to_rfc3339();
        let started = Instant::now();
        let cancel = CancelSignal::new();

        // Stage 1 (source): 入力データを配信
        let (source_tx, source_rx) = mpsc::channel(lane_buffer);
        let source_handle = spawn_source(items, source_tx);

        // Stage 2 (fan-out): Nレーンへラウンドロビン分配
        let (lane_txs, lane_rxs) = open_lanes(concurrency, lane_buffer);
        let distributor_handle = spawn_distributor(source_rx, lane_txs);

        // Stage 3 (workers): レーンごとに変換ワーカーを起動
        let (worker_handles, result_rxs) =
            spawn_workers(Arc::clone(&self.transform), lane_rxs, lane_buffer);

        // Stage 4 (merge): 統合ストリームへ集約
        let (output, collector_handles) = spawn_merger(result_rxs, cancel.clone(), lane_buffer);

        Ok(PipelineRun {
            output,
            cancel,
            total_items,
            started_at,
            started,
            source_handle,
            distributor_handle,
            worker_handles,
            collector_handles,
        })
    }
}

/// 実行中パイプラインのハンドル（Stage 5のシンクが保持する消費面）
///
/// `recv` が統合ストリームの消費面、`cancel` がキャンセル操作。ハンドルの
/// ドロップ時にもシグナルを発火するため、正常・異常を問わず全ての終了経路で
/// 転送待ちのコレクタが解放される。
#[derive(Debug)]
pub struct PipelineRun<R> {
    output: mpsc::Receiver<R>,
    cancel: CancelSignal,
    total_items: usize,
    started_at: String,
    started: Instant,
    source_handle: JoinHandle<Result<()>>,
    distributor_handle: JoinHandle<Result<()>>,
    worker_handles: Vec<JoinHandle<Result<()>>>,
    collector_handles: Vec<JoinHandle<Result<CollectorStats>>>,
}

impl<R> PipelineRun<R> {
    /// 次のマージ済みアイテムを受信する（終端でNone）
    pub async fn recv(&mut self) -> Option<R> {
        self.output.recv().await
    }

    /// キャンセルシグナルを発火する（冪等）
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// キャンセルシグナルのハンドルを取得
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// 入力アイテムの総数
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// 全ステージの終了を待ち、実行サマリーを生成する
    ///
    /// 読み残しがあっても停止しない。シグナルを発火して統合ストリームを
    /// 閉じた上で各ステージを合流させるため、自然排出の完了が保証される。
    pub async fn finish(mut self) -> PipelineResult<PipelineSummary> {
        self.cancel.cancel();
        self.output.close();

        (&mut self.source_handle)
            .await
            .map_err(PipelineError::task)?
            .map_err(PipelineError::internal)?;

        (&mut self.distributor_handle)
            .await
            .map_err(PipelineError::task)?
            .map_err(PipelineError::internal)?;

        for handle in self.worker_handles.iter_mut() {
            handle
                .await
                .map_err(PipelineError::task)?
                .map_err(PipelineError::internal)?;
        }

        let mut stats = CollectorStats::default();
        for handle in self.collector_handles.iter_mut() {
            let collector_stats = handle
                .await
                .map_err(PipelineError::task)?
                .map_err(PipelineError::internal)?;
            stats = stats.merge(collector_stats);
        }

        let total_time_ms = self.started.elapsed().as_millis() as u64;
        let average_time_per_item_ms = if self.total_items > 0 {
            total_time_ms as f64 / self.total_items as f64
        } else {
            0.0
        };

        Ok(PipelineSummary {
            total_items: self.total_items,
            merged_items: stats.forwarded,
            dropped_items: stats.dropped,
            total_time_ms,
            average_time_per_item_ms,
            started_at: self.started_at.clone(),
        })
    }
}

impl<R> Drop for PipelineRun<R> {
    fn drop(&mut self) {
        // シンクがどの経路で終了してもシグナルは必ず発火する
        self.cancel.cancel();
    }
}
