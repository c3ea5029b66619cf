//! # エンドポイントテスト用共通ヘルパー
//!
//! resolve, contentテストで共有するモックオリジンとテスト状態の構築。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mirror_types::LogicalPath;

use crate::clock::Clock;
use crate::config::AppState;
use crate::origin::{OriginError, OriginFetcher};
use crate::signer::LinkSigner;
use crate::storage::MemoryStore;

/// 固定コンテンツを返し、呼び出し回数を記録するモックフェッチャー。
pub struct MockOrigin {
    /// 返却するコンテンツ（Noneなら常に取得失敗）
    content: Option<Vec<u8>>,
    /// fetchの呼び出し回数
    calls: AtomicUsize,
}

impl MockOrigin {
    /// 常に指定コンテンツを返すモックを作成する。
    pub fn returning(content: &[u8]) -> Self {
        Self {
            content: Some(content.to_vec()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 常に取得失敗するモックを作成する。
    pub fn failing() -> Self {
        Self {
            content: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// fetchが呼ばれた回数を返す。
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl OriginFetcher for MockOrigin {
    async fn fetch(&self, path: &LogicalPath) -> Result<Vec<u8>, OriginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => Err(OriginError::Status {
                status: 404,
                url: format!("http://mock-origin/{path}"),
            }),
        }
    }
}

/// テスト用AppStateを構築するヘルパー。
///
/// 呼び出し側がstore/origin/clockのArcを保持したまま状態に注入できるよう、
/// 共有ハンドルを受け取る。
pub fn test_state(
    store: Arc<MemoryStore>,
    origin: Arc<impl OriginFetcher + 'static>,
    clock: Arc<impl Clock + 'static>,
) -> Arc<AppState> {
    Arc::new(AppState {
        store,
        origin,
        signer: LinkSigner::new(b"test-secret".to_vec(), "http://localhost:3000".to_string()),
        clock,
        link_ttl_secs: 3_600,
    })
}

/// テスト用モックオリジンサーバーを起動し、指定パスで指定データを返す。
pub async fn start_mock_origin(path: &str, data: Vec<u8>) -> u16 {
    use axum::routing::get;

    let app = axum::Router::new().route(
        path,
        get(move || {
            let d = data.clone();
            async move { d }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    port
}
