//! # Mirror Gateway 共有型定義
//!
//! GatewayのAPIで使用するデータ構造をRust構造体として提供する。
//!
//! ## エンコーディング規則
//! - 論理パス: スラッシュ区切りの正規化済み文字列（先頭・末尾スラッシュなし）
//! - 有効期限: UNIXタイムスタンプ（秒）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 論理パス
// ---------------------------------------------------------------------------

/// 論理パスの正規化・検証エラー。
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// 正規化後のパスが空
    #[error("論理パスが空です")]
    Empty,
    /// 許可されないセグメントを含む
    #[error("論理パスに不正なセグメントが含まれています: {0}")]
    InvalidSegment(String),
}

/// ストレージバックエンドに依存しない論理パス。
///
/// 正規化規則:
/// - 先頭・末尾のスラッシュを除去
/// - 連続するスラッシュを1つに畳む
///
/// 検証規則:
/// - 空のパスを拒否
/// - `.` / `..` セグメントとバックスラッシュを拒否
///
/// 同一リソースに対して取得・保存・URL発行のすべてで同じ正規化結果が
/// 使われることを前提とする。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// 生のパス文字列を正規化してLogicalPathを構築する。
    pub fn normalize(raw: &str) -> Result<Self, PathError> {
        if raw.contains('\\') {
            return Err(PathError::InvalidSegment("\\".to_string()));
        }

        let mut segments = Vec::new();
        for segment in raw.split('/') {
            // 先頭・末尾・連続スラッシュは空セグメントとして現れる
            if segment.is_empty() {
                continue;
            }
            if segment == "." || segment == ".." {
                return Err(PathError::InvalidSegment(segment.to_string()));
            }
            segments.push(segment);
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self(segments.join("/")))
    }

    /// 正規化済みパスを文字列スライスで返す。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Gateway API リクエスト/レスポンス
// ---------------------------------------------------------------------------

/// POST /media-url リクエスト。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUrlRequest {
    /// 取得対象の論理パス（正規化前でよい）
    pub path: String,
}

/// POST /media-url レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUrlResponse {
    /// 署名付きアクセスURL
    pub url: String,
    /// URL有効期限のUNIXタイムスタンプ（秒）
    pub expires_at: u64,
}
