use async_trait::async_trait;
use mockall::automock;

pub mod fn_transform;

pub use fn_transform::FnTransform;

/// 変換バックエンドのトレイト
///
/// ワーカーがアイテムごとに適用する変換処理。この中核設計では変換は
/// 全域関数として扱う（失敗チャンネルは持たない）。
#[automock]
#[async_trait]
pub trait TransformBackend<T: Send + Sync + 'static, R: Send + Sync + 'static>: Send + Sync {
    /// 単一アイテムを変換する
    async fn apply(&self, item: T) -> R;

    /// 変換処理の名前を取得
    fn transform_name(&self) -> &'static str {
        "unnamed" // デフォルトは無名
    }
}
