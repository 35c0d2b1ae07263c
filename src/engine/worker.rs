// Worker - レーン専属の変換ワーカー機能

use crate::transform::TransformBackend;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// 単一Worker: 専属の入力レーンを変換して専属の出力レーンへ転送
///
/// 入力レーンが閉じて排出されるまで読み続け、アイテムごとに変換を適用し、
/// 受信した順序のまま転送する（レーン内FIFO保証）。入力排出後、出力
/// 送信側のドロップにより出力レーンがちょうど一度閉じる。
pub fn spawn_single_worker<T, R, F>(
    transform: Arc<F>,
    mut lane_rx: mpsc::Receiver<T>,
    out_tx: mpsc::Sender<R>,
) -> tokio::task::JoinHandle<Result<()>>
where
    T: Send + Sync + 'static,
    R: Send + Sync + 'static,
    F: TransformBackend<T, R> + 'static,
{
    tokio::spawn(async move {
        while let Some(item) = lane_rx.recv().await {
            let result = transform.apply(item).await;

            if (out_tx.send(result).await).is_err() {
                // 下流が先に終了した場合は転送を打ち切る
                break;
            }
        }
        Ok(())
    })
}

/// Workers: 入力レーンごとにちょうど一つのワーカーを起動
///
/// 各ワーカーは入力・出力レーンの組を排他的に所有し、ワーカー間で
/// 共有される可変状態は存在しない。レーン順に対応した出力受信側と
/// ハンドルを返す。
pub fn spawn_workers<T, R, F>(
    transform: Arc<F>,
    lane_rxs: Vec<mpsc::Receiver<T>>,
    buffer: usize,
) -> (
    Vec<tokio::task::JoinHandle<Result<()>>>,
    Vec<mpsc::Receiver<R>>,
)
where
    T: Send + Sync + 'static,
    R: Send + Sync + 'static,
    F: TransformBackend<T, R> + 'static,
{
    let mut handles = Vec::with_capacity(lane_rxs.len());
    let mut result_rxs = Vec::with_capacity(lane_rxs.len());

    for lane_rx in lane_rxs {
        let (out_tx, out_rx) = mpsc::channel(buffer);
        handles.push(spawn_single_worker(Arc::clone(&transform), lane_rx, out_tx));
        result_rxs.push(out_rx);
    }

    (handles, result_rxs)
}
