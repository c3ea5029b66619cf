//! # Mirror Gateway
//!
//! 外部オリジンのリソースを初回アクセス時に取得してキャッシュし、
//! 署名付きの期限付きアクセスURLを発行するゲートウェイ。
//!
//! ## 役割
//! - キャッシュ未登録リソースのオリジンからの取得と保存
//! - キャッシュ済みリソースへの署名付きURL発行
//! - 署名検証付きのコンテンツ配信
//!
//! ## API エンドポイント
//! - `POST /media-url` — 署名付きURL発行
//! - `GET /media/{*path}` — 署名付きURLへの307リダイレクト
//! - `GET /content/{*path}` — 署名検証付きコンテンツ配信

mod clock;
mod config;
mod endpoints;
mod error;
mod origin;
mod signer;
mod storage;

use std::sync::Arc;

use config::AppState;

/// S3バックエンドを構築する。vendor-aws feature有効時のみ使用可能。
#[cfg(feature = "vendor-aws")]
fn build_s3_store() -> anyhow::Result<Arc<dyn storage::ResourceStore>> {
    Ok(Arc::new(storage::S3Store::from_env()?))
}

#[cfg(not(feature = "vendor-aws"))]
fn build_s3_store() -> anyhow::Result<Arc<dyn storage::ResourceStore>> {
    anyhow::bail!("vendor-aws featureが無効のためS3バックエンドは使用できません")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // 環境変数の読み込み
    let origin_base_url = std::env::var("ORIGIN_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:9000/assets".to_string());
    let public_base_url = std::env::var("PUBLIC_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    let link_ttl_secs: u64 = match std::env::var("LINK_TTL_SECS") {
        Ok(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("LINK_TTL_SECSは秒数である必要があります"))?,
        Err(_) => 3600,
    };

    // 署名用シークレット
    let secret = if let Ok(secret_hex) = std::env::var("LINK_SIGNING_SECRET") {
        hex::decode(&secret_hex)
            .map_err(|_| anyhow::anyhow!("LINK_SIGNING_SECRETは16進数である必要があります"))?
    } else {
        // 開発環境用: ランダムシークレットを生成
        tracing::warn!(
            "LINK_SIGNING_SECRETが未設定です。ランダムシークレットを生成します（開発環境用）"
        );
        use rand::RngCore;
        let mut buf = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut buf);
        buf.to_vec()
    };

    // ストレージバックエンド選択: STORAGE_BACKEND=memory ならメモリ、それ以外はS3互換
    let store: Arc<dyn storage::ResourceStore> =
        if std::env::var("STORAGE_BACKEND").unwrap_or_default() == "memory" {
            tracing::info!("MemoryStoreで起動します");
            Arc::new(storage::MemoryStore::new())
        } else {
            tracing::info!("S3Storeで起動します");
            build_s3_store()?
        };

    let state = Arc::new(AppState {
        store,
        origin: Arc::new(origin::HttpOrigin::new(
            reqwest::Client::new(),
            origin_base_url.clone(),
        )),
        signer: signer::LinkSigner::new(secret, public_base_url),
        clock: Arc::new(clock::SystemClock),
        link_ttl_secs,
    });

    tracing::info!(origin_base_url = %origin_base_url, "オリジンを設定しました");

    let app = axum::Router::new()
        .route(
            "/media-url",
            axum::routing::post(endpoints::handle_media_url),
        )
        .route(
            "/media/{*path}",
            axum::routing::get(endpoints::handle_media_redirect),
        )
        .route(
            "/content/{*path}",
            axum::routing::get(endpoints::handle_content),
        )
        .with_state(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    tracing::info!("Mirror Gatewayを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
