//! # 外部オリジンフェッチャー
//!
//! キャッシュに未登録のリソースを外部オリジンから取得する。
//! 取得は1リクエストにつき1回のみ試行し、リトライは行わない。

use mirror_types::LogicalPath;

/// オリジン取得エラー。
///
/// 転送エラー・非2xxレスポンス・空レスポンスを区別して保持するが、
/// 呼び出し側では一律「リソースなし」として扱われる。
#[derive(Debug, thiserror::Error)]
pub enum OriginError {
    /// HTTP送信またはレスポンス読み取りに失敗
    #[error("オリジンへのHTTPリクエストに失敗: {0}")]
    Request(String),
    /// オリジンが非2xxステータスを返した
    #[error("オリジンがHTTPエラーを返しました: ステータス {status} ({url})")]
    Status { status: u16, url: String },
    /// オリジンが空のレスポンスを返した
    #[error("オリジンが空のレスポンスを返しました ({0})")]
    EmptyBody(String),
}

/// 外部オリジンからリソースを取得するトレイト。
///
/// 論理パスに対応するコンテンツの取得方法を抽象化する。
#[async_trait::async_trait]
pub trait OriginFetcher: Send + Sync {
    /// 論理パスに対応するコンテンツを取得する。
    async fn fetch(&self, path: &LogicalPath) -> Result<Vec<u8>, OriginError>;
}

/// HTTP経由でオリジンからリソースを取得するフェッチャー。
///
/// URL形式: `{base_url}/{path}`
pub struct HttpOrigin {
    /// HTTPクライアント
    client: reqwest::Client,
    /// オリジンのベースURL（末尾スラッシュなし）
    base_url: String,
}

impl HttpOrigin {
    /// 新しいHttpOriginを作成する。
    ///
    /// # 引数
    /// - `client`: 共有HTTPクライアント
    /// - `base_url`: オリジンのベースURL（例: "https://cdn.example.com/assets"）
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl OriginFetcher for HttpOrigin {
    async fn fetch(&self, path: &LogicalPath) -> Result<Vec<u8>, OriginError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OriginError::Request(format!("HTTP送信失敗 ({url}): {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OriginError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| OriginError::Request(format!("レスポンス読み取り失敗 ({url}): {e}")))?;

        if body.is_empty() {
            return Err(OriginError::EmptyBody(url));
        }

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_helpers::start_mock_origin;

    /// モックオリジンからコンテンツを取得できることを確認
    #[tokio::test]
    async fn test_fetch_success() {
        let port = start_mock_origin("/assets/test/image", b"external-image-content".to_vec()).await;
        let origin = HttpOrigin::new(
            reqwest::Client::new(),
            format!("http://127.0.0.1:{port}/assets"),
        );

        let path = LogicalPath::normalize("test/image").unwrap();
        let content = origin.fetch(&path).await.unwrap();
        assert_eq!(content, b"external-image-content");
    }

    /// 存在しないパスへの取得がStatusエラーになることを確認
    #[tokio::test]
    async fn test_fetch_missing_path_is_status_error() {
        let port = start_mock_origin("/assets/present", b"data".to_vec()).await;
        let origin = HttpOrigin::new(
            reqwest::Client::new(),
            format!("http://127.0.0.1:{port}/assets"),
        );

        let path = LogicalPath::normalize("missing/image").unwrap();
        let err = origin.fetch(&path).await.unwrap_err();
        assert!(matches!(err, OriginError::Status { status: 404, .. }));
    }

    /// 空レスポンスがEmptyBodyエラーになることを確認
    #[tokio::test]
    async fn test_fetch_empty_body_rejected() {
        let port = start_mock_origin("/assets/empty", Vec::new()).await;
        let origin = HttpOrigin::new(
            reqwest::Client::new(),
            format!("http://127.0.0.1:{port}/assets"),
        );

        let path = LogicalPath::normalize("empty").unwrap();
        let err = origin.fetch(&path).await.unwrap_err();
        assert!(matches!(err, OriginError::EmptyBody(_)));
    }

    /// ベースURLの末尾スラッシュが正規化されることを確認
    #[tokio::test]
    async fn test_base_url_trailing_slash_normalized() {
        let port = start_mock_origin("/assets/a", b"data".to_vec()).await;
        let origin = HttpOrigin::new(
            reqwest::Client::new(),
            format!("http://127.0.0.1:{port}/assets/"),
        );

        let path = LogicalPath::normalize("a").unwrap();
        assert_eq!(origin.fetch(&path).await.unwrap(), b"data");
    }
}
