//! # 署名付きURL発行エンドポイント
//!
//! キャッシュ確認 → オリジン取得 → 保存 → URL発行 を1リクエストで行う。
//!
//! - `POST /media-url` — 署名付きURLをJSONで返す
//! - `GET /media/{*path}` — 署名付きURLへ307リダイレクト

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use mirror_types::{LogicalPath, MediaUrlRequest, MediaUrlResponse};

use crate::config::AppState;
use crate::error::GatewayError;
use crate::signer::ExpiringLink;

/// キャッシュ確認→オリジン取得→保存→URL発行を行う。
///
/// 処理順序:
/// 1. キャッシュに存在すればオリジン取得をスキップ
/// 2. 未登録ならオリジンから取得し、失敗はNotFoundとして呼び出し元に返す
/// 3. 取得したコンテンツをキャッシュに保存（保存失敗時はURLを発行しない）
/// 4. 現在時刻を1度だけ読み、有効期限付きURLを発行
pub async fn resolve_media_link(
    state: &AppState,
    path: &LogicalPath,
) -> Result<ExpiringLink, GatewayError> {
    if !state.store.exists(path).await? {
        let content = match state.origin.fetch(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::info!(path = %path, error = %e, "オリジン取得に失敗しました");
                return Err(GatewayError::NotFound(path.to_string()));
            }
        };

        state.store.put(path, &content).await?;
        tracing::info!(
            path = %path,
            bytes = content.len(),
            "オリジンから取得してキャッシュに保存しました"
        );
    }

    let now = state.clock.now();
    Ok(state.signer.issue(path, now + state.link_ttl_secs))
}

/// POST /media-url — 署名付きURL発行。
///
/// リクエストボディの論理パスを正規化し、署名付きURLと有効期限を返す。
pub async fn handle_media_url(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MediaUrlRequest>,
) -> Result<Json<MediaUrlResponse>, GatewayError> {
    let path = LogicalPath::normalize(&body.path)
        .map_err(|e| GatewayError::BadRequest(e.to_string()))?;

    let link = resolve_media_link(&state, &path).await?;

    Ok(Json(MediaUrlResponse {
        url: link.url,
        expires_at: link.expires_at,
    }))
}

/// GET /media/{*path} — 署名付きURLへのリダイレクト。
pub async fn handle_media_redirect(
    State(state): State<Arc<AppState>>,
    Path(raw_path): Path<String>,
) -> Result<Redirect, GatewayError> {
    let path = LogicalPath::normalize(&raw_path)
        .map_err(|e| GatewayError::BadRequest(e.to_string()))?;

    let link = resolve_media_link(&state, &path).await?;

    Ok(Redirect::temporary(&link.url))
}
