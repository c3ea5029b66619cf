//! # メモリ内リソースキャッシュ実装
//!
//! ローカル開発・テスト用のストレージバックエンド。
//! コンテンツはプロセスのメモリ内にのみ保持される。

use std::collections::HashMap;
use std::sync::RwLock;

use mirror_types::LogicalPath;

use super::ResourceStore;
use crate::error::GatewayError;

/// メモリ内ストレージによるリソースキャッシュ実装。
///
/// 書き込みはマップ全体の書き込みロック下で値ごと入れ替えるため、
/// 部分的な書き込みが観測されることはない。
pub struct MemoryStore {
    /// 論理パス → コンテンツ
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// 空のMemoryStoreを作成する。
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ResourceStore for MemoryStore {
    async fn exists(&self, path: &LogicalPath) -> Result<bool, GatewayError> {
        Ok(self.entries.read().unwrap().contains_key(path.as_str()))
    }

    async fn get(&self, path: &LogicalPath) -> Result<Vec<u8>, GatewayError> {
        self.entries
            .read()
            .unwrap()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(path.to_string()))
    }

    async fn put(&self, path: &LogicalPath, content: &[u8]) -> Result<(), GatewayError> {
        self.entries
            .write()
            .unwrap()
            .insert(path.as_str().to_string(), content.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// putしたコンテンツがgetでそのまま取得できることを確認
    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        let path = LogicalPath::normalize("test/image").unwrap();

        store.put(&path, b"external-image-content").await.unwrap();
        let content = store.get(&path).await.unwrap();
        assert_eq!(content, b"external-image-content");
    }

    /// 未登録パスのgetがNotFoundになることを確認
    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        let path = LogicalPath::normalize("missing/image").unwrap();

        let err = store.get(&path).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(p) if p == "missing/image"));
    }

    /// existsが副作用なく登録状態を返すことを確認
    #[tokio::test]
    async fn test_exists_has_no_side_effects() {
        let store = MemoryStore::new();
        let path = LogicalPath::normalize("test/image").unwrap();

        assert!(!store.exists(&path).await.unwrap());
        // 問い合わせただけではエントリは作られない
        assert!(!store.exists(&path).await.unwrap());

        store.put(&path, b"data").await.unwrap();
        assert!(store.exists(&path).await.unwrap());
    }

    /// 同一パスへのputが上書きになることを確認
    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        let path = LogicalPath::normalize("test/image").unwrap();

        store.put(&path, b"old").await.unwrap();
        store.put(&path, b"new").await.unwrap();
        assert_eq!(store.get(&path).await.unwrap(), b"new");
    }
}
