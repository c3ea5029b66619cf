//! # S3互換 リソースキャッシュ実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用する
//! リソースキャッシュ実装。

use mirror_types::LogicalPath;

use super::ResourceStore;
use crate::error::GatewayError;

/// S3互換ストレージによるリソースキャッシュ実装。
/// AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用する。
pub struct S3Store {
    bucket: s3::Bucket,
}

impl S3Store {
    /// S3互換バケットからS3Storeを構築する。
    pub fn new(bucket: s3::Bucket) -> Self {
        Self { bucket }
    }

    /// 環境変数からS3互換バケットを初期化する。
    fn init_bucket(
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        bucket_name: &str,
    ) -> anyhow::Result<s3::Bucket> {
        // AWS S3エンドポイント（s3.REGION.amazonaws.com）からリージョンを自動検出。
        // 非AWSエンドポイントではus-east-1をフォールバックとして使用。
        let detected_region = std::env::var("S3_REGION").ok().unwrap_or_else(|| {
            if let Some(caps) = endpoint.find("s3.").and_then(|start| {
                let rest = &endpoint[start + 3..];
                rest.find(".amazonaws.com").map(|end| rest[..end].to_string())
            }) {
                caps
            } else {
                "us-east-1".to_string()
            }
        });
        let region = s3::Region::Custom {
            region: detected_region,
            endpoint: endpoint.to_string(),
        };

        let credentials = s3::creds::Credentials::new(
            Some(access_key),
            Some(secret_key),
            None,
            None,
            None,
        )?;

        let bucket = s3::Bucket::new(bucket_name, region, credentials)?.with_path_style();

        Ok(*bucket)
    }

    /// 環境変数から構築する。
    pub fn from_env() -> anyhow::Result<Self> {
        let endpoint = std::env::var("S3_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let access_key =
            std::env::var("S3_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key =
            std::env::var("S3_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let bucket_name =
            std::env::var("S3_BUCKET").unwrap_or_else(|_| "mirror-cache".to_string());

        let bucket = Self::init_bucket(&endpoint, &access_key, &secret_key, &bucket_name)?;

        Ok(Self::new(bucket))
    }
}

#[async_trait::async_trait]
impl ResourceStore for S3Store {
    async fn exists(&self, path: &LogicalPath) -> Result<bool, GatewayError> {
        match self.bucket.head_object(path.as_str()).await {
            Ok((_, 200)) => Ok(true),
            Ok((_, _)) => Ok(false),
            Err(e) => Err(GatewayError::Storage(format!("存在確認に失敗: {e}"))),
        }
    }

    async fn get(&self, path: &LogicalPath) -> Result<Vec<u8>, GatewayError> {
        let response = self
            .bucket
            .get_object(path.as_str())
            .await
            .map_err(|e| GatewayError::Storage(format!("コンテンツ取得に失敗: {e}")))?;

        match response.status_code() {
            200 => Ok(response.bytes().to_vec()),
            404 => Err(GatewayError::NotFound(path.to_string())),
            code => Err(GatewayError::Storage(format!(
                "コンテンツ取得でHTTPエラー: ステータス {code}"
            ))),
        }
    }

    async fn put(&self, path: &LogicalPath, content: &[u8]) -> Result<(), GatewayError> {
        let response = self
            .bucket
            .put_object(path.as_str(), content)
            .await
            .map_err(|e| GatewayError::Storage(format!("コンテンツ保存に失敗: {e}")))?;

        if response.status_code() != 200 {
            return Err(GatewayError::Storage(format!(
                "コンテンツ保存でHTTPエラー: ステータス {}",
                response.status_code()
            )));
        }

        Ok(())
    }
}
