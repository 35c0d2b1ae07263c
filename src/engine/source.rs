// Source - 入力アイテム配信機能

use anyhow::Result;
use tokio::sync::mpsc;

/// Source: 入力コレクションを元の順序でソースレーンへ配信
///
/// 各アイテムはちょうど一度だけ送信され、全件送信後にレーンが閉じる。
/// 空の入力では即座に閉じたレーンになる。
pub fn spawn_source<T>(
    items: Vec<T>,
    source_tx: mpsc::Sender<T>,
) -> tokio::task::JoinHandle<Result<()>>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        for item in items {
            if (source_tx.send(item).await).is_err() {
                // チャンネルが閉じられた場合は正常終了
                break;
            }
        }
        // source_txをドロップしてチャンネル終了シグナル
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_source_sends_all_items_in_order() {
        let items = vec![1, 2, 3, 4, 5];
        let (source_tx, mut source_rx) = mpsc::channel::<i64>(10);

        // Source起動
        let source_handle = spawn_source(items.clone(), source_tx);

        // 全アイテムを受信
        let mut received = Vec::new();
        while let Ok(Some(item)) = timeout(Duration::from_millis(100), source_rx.recv()).await {
            received.push(item);
        }

        // Source完了確認
        source_handle.await.unwrap().unwrap();

        // 送信内容と順序確認
        assert_eq!(received, items);
    }

    #[tokio::test]
    async fn test_source_empty_items() {
        let items: Vec<i64> = vec![];
        let (source_tx, mut source_rx) = mpsc::channel::<i64>(10);

        let source_handle = spawn_source(items, source_tx);

        // チャンネルが即座に閉じることを確認
        let received = timeout(Duration::from_millis(100), source_rx.recv()).await;
        assert!(received.is_err() || received.unwrap().is_none());

        source_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_source_receiver_dropped_early() {
        let items = vec![1, 2, 3];
        let (source_tx, source_rx) = mpsc::channel::<i64>(1);

        // 受信側を即座に閉じる
        drop(source_rx);

        let source_handle = spawn_source(items, source_tx);

        // Sourceはエラーなく終了すべき
        source_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_source_blocks_until_consumer_accepts() {
        // バッファ1のレーンでは消費されるまで送信が進まない
        let items = vec![1, 2, 3];
        let (source_tx, mut source_rx) = mpsc::channel::<i64>(1);

        let source_handle = spawn_source(items, source_tx);

        // 消費しない間はSourceは完了しない
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!source_handle.is_finished());

        // 消費すれば完了する
        assert_eq!(source_rx.recv().await, Some(1));
        assert_eq!(source_rx.recv().await, Some(2));
        assert_eq!(source_rx.recv().await, Some(3));
        assert_eq!(source_rx.recv().await, None);

        source_handle.await.unwrap().unwrap();
    }
}
