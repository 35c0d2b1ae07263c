// Fan-out - ラウンドロビン分配機能

use anyhow::Result;
use tokio::sync::mpsc;

/// レーン一式を事前構築する
///
/// 所有権付きの送信・受信ハンドル集合を返す。公開後に変更されることはなく、
/// 各レーンは生産者・消費者とも一つずつ持つ。
pub fn open_lanes<T>(
    lane_count: usize,
    buffer: usize,
) -> (Vec<mpsc::Sender<T>>, Vec<mpsc::Receiver<T>>)
where
    T: Send + 'static,
{
    let mut lane_txs = Vec::with_capacity(lane_count);
    let mut lane_rxs = Vec::with_capacity(lane_count);

    for _ in 0..lane_count {
        let (tx, rx) = mpsc::channel(buffer);
        lane_txs.push(tx);
        lane_rxs.push(rx);
    }

    (lane_txs, lane_rxs)
}

/// Distributor: 入力ストリームをNレーンへラウンドロビン分配
///
/// アイテム `i` はレーン `i % N` に割り当てられる（カウンタはリセットされない）。
/// 分配タスクは単一であり、各送信は対象レーンの消費を待つため、詰まった
/// レーンは後続レーンへの割り当ても停止させる。これはラウンドロビン+
/// ブロッキングハンドオフ構成の既知のスループット特性であり、分配の
/// 並列化で解消してはならない。
///
/// 入力枯渇後は全レーン送信側のドロップにより各レーンがちょうど一度閉じる。
/// `lane_txs` が空でないことは呼び出し側の前提条件。
pub fn spawn_distributor<T>(
    mut source_rx: mpsc::Receiver<T>,
    lane_txs: Vec<mpsc::Sender<T>>,
) -> tokio::task::JoinHandle<Result<()>>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        let lane_count = lane_txs.len();
        let mut index: usize = 0;

        while let Some(item) = source_rx.recv().await {
            if lane_txs[index % lane_count].send(item).await.is_err() {
                // 消費側が先に終了した場合は分配を打ち切る
                break;
            }
            index += 1;
        }

        // lane_txsのドロップで全レーンが閉じる（分配停止後のみ）
        Ok(())
    })
}
