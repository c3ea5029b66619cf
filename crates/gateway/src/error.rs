//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。

use axum::http::StatusCode;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// リソースが見つからない（オリジンから取得できなかった場合を含む）
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),
    /// ストレージ操作に失敗
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),
    /// 署名検証失敗
    #[error("署名の検証に失敗しました")]
    InvalidSignature,
    /// URL有効期限切れ
    #[error("URLの有効期限が切れています")]
    LinkExpired,
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidSignature => StatusCode::FORBIDDEN,
            GatewayError::LinkExpired => StatusCode::GONE,
        };
        (status, self.to_string()).into_response()
    }
}
