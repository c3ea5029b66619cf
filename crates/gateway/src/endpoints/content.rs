//! # コンテンツ配信エンドポイント
//!
//! 発行済み署名付きURLの検証と、キャッシュ済みコンテンツの配信。

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use mirror_types::LogicalPath;
use serde::Deserialize;

use crate::config::AppState;
use crate::error::GatewayError;

/// 署名付きURLのクエリパラメータ。
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    /// 有効期限のUNIXタイムスタンプ（秒）
    pub expires: u64,
    /// HMAC-SHA256署名（16進）
    pub sig: String,
}

/// GET /content/{*path} — 署名検証付きコンテンツ配信。
///
/// 署名が一致しない場合は403、有効期限切れは410を返す。
/// 検証を通過した場合のみキャッシュからコンテンツを読み出す。
pub async fn handle_content(
    State(state): State<Arc<AppState>>,
    Path(raw_path): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Result<Response, GatewayError> {
    let path = LogicalPath::normalize(&raw_path)
        .map_err(|e| GatewayError::BadRequest(e.to_string()))?;

    state
        .signer
        .verify(&path, query.expires, &query.sig, state.clock.now())?;

    let content = state.store.get(&path).await?;

    Ok(content.into_response())
}
