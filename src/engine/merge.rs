// Merge - ファンイン統合機能
// Nレーンの結果を単一の統合ストリームへ集約する

use crate::core::{CancelSignal, CollectorStats};
use anyhow::Result;
use tokio::sync::mpsc;

/// 単一Collector: ワーカー出力レーンを統合ストリームへ転送
///
/// レーンが閉じて排出されるまで読み続ける。各転送はキャンセルシグナルと
/// 競合し、キャンセルが先に発火した場合はアイテムを破棄して次の読み取りへ
/// 進む。消費者が停止した統合ストリームで転送待ちのまま固まることはない。
/// シンク側が切断された場合の送信失敗も破棄として数え、排出は継続する。
pub fn spawn_single_collector<R>(
    mut lane_rx: mpsc::Receiver<R>,
    out_tx: mpsc::Sender<R>,
    cancel: CancelSignal,
) -> tokio::task::JoinHandle<Result<CollectorStats>>
where
    R: Send + 'static,
{
    tokio::spawn(async move {
        let mut stats = CollectorStats::default();

        while let Some(item) = lane_rx.recv().await {
            tokio::select! {
                _ = cancel.cancelled() => {
                    stats.dropped += 1;
                }
                sent = out_tx.send(item) => match sent {
                    Ok(()) => stats.forwarded += 1,
                    Err(_) => stats.dropped += 1,
                },
            }
        }

        Ok(stats)
    })
}

/// Merger: N本のワーカー出力レーンを一つの統合ストリームに束ねる
///
/// レーンごとにコレクタを一つ起動する。統合ストリームの送信側は各コレクタ
/// が一つずつ保持し、ここで元のハンドルを手放すため、最後のコレクタ終了と
/// 同時にストリームはちょうど一度だけ閉じる。全コレクタ終了前に閉じること
/// は構造上あり得ない。レーン間の出力順序は非決定的。
pub fn spawn_merger<R>(
    lane_rxs: Vec<mpsc::Receiver<R>>,
    cancel: CancelSignal,
    buffer: usize,
) -> (
    mpsc::Receiver<R>,
    Vec<tokio::task::JoinHandle<Result<CollectorStats>>>,
)
where
    R: Send + 'static,
{
    let (out_tx, out_rx) = mpsc::channel(buffer);

    let handles = lane_rxs
        .into_iter()
        .map(|lane_rx| spawn_single_collector(lane_rx, out_tx.clone(), cancel.clone()))
        .collect();

    drop(out_tx);
    (out_rx, handles)
}
