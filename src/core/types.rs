// パイプラインに関連するデータ型定義

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineSummary {
    /// 入力アイテムの総数
    pub total_items: usize,
    /// マージ出力へ転送されたアイテム数
    pub merged_items: usize,
    /// キャンセルまたはシンク切断により破棄されたアイテム数
    pub dropped_items: usize,
    /// 総実行時間（ミリ秒）
    pub total_time_ms: u64,
    /// アイテムあたりの平均時間（ミリ秒）
    pub average_time_per_item_ms: f64,
    /// 実行開始時刻（RFC 3339）
    pub started_at: String,
}

/// コレクタ単位の転送統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    /// 統合ストリームへ転送できたアイテム数
    pub forwarded: usize,
    /// キャンセル勝ちまたは送信失敗で破棄したアイテム数
    pub dropped: usize,
}

impl CollectorStats {
    /// 統計の合算
    pub fn merge(self, other: CollectorStats) -> CollectorStats {
        CollectorStats {
            forwarded: self.forwarded + other.forwarded,
            dropped: self.dropped + other.dropped,
        }
    }
}
