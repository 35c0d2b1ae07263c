// パイプラインの抽象化トレイト定義
// 設定と進捗報告のインターフェースを定義

use async_trait::async_trait;
use mockall::automock;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// ワーカーレーン数（並列度 N）を取得
    fn concurrency(&self) -> usize;

    /// レーンのバッファサイズを取得
    ///
    /// 1 が同期的ハンドオフに最も近く、バックプレッシャーが直ちに伝播する
    fn lane_buffer_size(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn concurrency(&self) -> usize {
        self.as_ref().concurrency()
    }

    fn lane_buffer_size(&self) -> usize {
        self.as_ref().lane_buffer_size()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
///
/// パイプライン本体は出力先を知らない。コンソール出力もテスト用の無音も
/// この trait の実装として注入される。
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_items: usize);

    /// 進捗更新の報告
    async fn report_progress(&self, merged: usize, total: usize);

    /// アイテム破棄時の報告（キャンセルによるドロップ）
    async fn report_dropped(&self, dropped: usize);

    /// 処理完了時の報告
    async fn report_completed(&self, total_merged: usize, total_dropped: usize);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_items: usize) {
        self.as_ref().report_started(total_items).await
    }

    async fn report_progress(&self, merged: usize, total: usize) {
        self.as_ref().report_progress(merged, total).await
    }

    async fn report_dropped(&self, dropped: usize) {
        self.as_ref().report_dropped(dropped).await
    }

    async fn report_completed(&self, total_merged: usize, total_dropped: usize) {
        self.as_ref()
            .report_completed(total_merged, total_dropped)
            .await
    }
}
