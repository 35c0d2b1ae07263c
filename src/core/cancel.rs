// CancelSignal - 一回限りのブロードキャスト型キャンセル通知

use tokio_util::sync::CancellationToken;

/// 一回限りのブロードキャストキャンセルシグナル
///
/// 一度発火すると全てのリスナーから永続的に観測可能で、解除されることはない。
/// `cancel()` は冪等であり、2回目以降の呼び出しは何も行わない。
/// マージ段階のコレクタが転送とキャンセルを競合させるために使用する。
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
}

impl CancelSignal {
    /// 新しい未発火のシグナルを作成
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// シグナルを発火する（冪等）
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// 既に発火済みかどうか
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 発火まで待機する
    ///
    /// 既に発火済みの場合は即座に完了する
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}
