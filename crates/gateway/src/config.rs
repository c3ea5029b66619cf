//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みはエントリポイント側で行い、
//! ここでは全エンドポイントが共有する状態を定義する。

use std::sync::Arc;

use crate::clock::Clock;
use crate::origin::OriginFetcher;
use crate::signer::LinkSigner;
use crate::storage::ResourceStore;

/// Gatewayの共有状態。
pub struct AppState {
    /// リソースキャッシュ（S3互換・メモリ等、トレイトで抽象化）
    pub store: Arc<dyn ResourceStore>,
    /// 外部オリジンフェッチャー
    pub origin: Arc<dyn OriginFetcher>,
    /// 署名付きURL発行・検証器
    pub signer: LinkSigner,
    /// 時刻ソース（テストでは固定時刻のClockに差し替える）
    pub clock: Arc<dyn Clock>,
    /// 発行するURLの有効期間（秒）
    pub link_ttl_secs: u64,
}
