//! # リソースキャッシュ
//!
//! 取得済みコンテンツを保持するストレージバックエンドの抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュール、メモリ内実装は `memory`
//! サブモジュールを参照。

pub mod memory;
#[cfg(feature = "vendor-aws")]
pub mod s3;

pub use memory::MemoryStore;
#[cfg(feature = "vendor-aws")]
pub use s3::S3Store;

use mirror_types::LogicalPath;

use crate::error::GatewayError;

/// リソースキャッシュの抽象インターフェース。
///
/// 運用者はS3互換ストレージ（MinIO, AWS S3, Cloudflare R2等）や
/// メモリ内ストアを実装として選択できる。
#[async_trait::async_trait]
pub trait ResourceStore: Send + Sync {
    /// パスにコンテンツが存在するかを返す。副作用を持たない。
    async fn exists(&self, path: &LogicalPath) -> Result<bool, GatewayError>;

    /// パスのコンテンツを取得する。
    /// 存在しない場合は`GatewayError::NotFound`を返す。
    async fn get(&self, path: &LogicalPath) -> Result<Vec<u8>, GatewayError>;

    /// パスにコンテンツを書き込む。既存のコンテンツは上書きする。
    /// 部分的な書き込みが読み取り側から観測されてはならない。
    async fn put(&self, path: &LogicalPath, content: &[u8]) -> Result<(), GatewayError>;
}
