// FnTransform - クロージャを変換バックエンドとして扱うアダプタ

use super::TransformBackend;
use async_trait::async_trait;

/// 同期クロージャをラップする変換バックエンド
///
/// ビジネスロジック（変換関数の中身）はパイプラインの関心事ではないため、
/// 呼び出し側が任意の `Fn(T) -> R` を差し込めるようにする。
pub struct FnTransform<F> {
    name: &'static str,
    func: F,
}

impl<F> FnTransform<F> {
    /// クロージャから変換バックエンドを作成
    pub fn new(func: F) -> Self {
        Self {
            name: "fn_transform",
            func,
        }
    }

    /// 名前付きで作成（レポートやベンチマークでの識別用）
    pub fn named(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

#[async_trait]
impl<T, R, F> TransformBackend<T, R> for FnTransform<F>
where
    T: Send + Sync + 'static,
    R: Send + Sync + 'static,
    F: Fn(T) -> R + Send + Sync,
{
    async fn apply(&self, item: T) -> R {
        (self.func)(item)
    }

    fn transform_name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_transform_applies_closure() {
        let transform = FnTransform::new(|x: i64| (x * 10).to_string());

        assert_eq!(transform.apply(1).await, "10");
        assert_eq!(transform.apply(11).await, "110");
        assert_eq!(transform.transform_name(), "fn_transform");
    }

    #[tokio::test]
    async fn test_fn_transform_named() {
        let transform = FnTransform::named("times_ten", |x: i64| x * 10);

        assert_eq!(transform.apply(4).await, 40);
        assert_eq!(transform.transform_name(), "times_ten");
    }

    #[tokio::test]
    async fn test_fn_transform_type_change() {
        // 入力と出力の型が異なるケース
        let transform = FnTransform::new(|s: String| s.len());

        assert_eq!(transform.apply("hello".to_string()).await, 5);
    }
}
