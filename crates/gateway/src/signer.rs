//! # 署名付きURL発行
//!
//! キャッシュ済みリソースへの期限付きアクセスURLの発行と検証。
//!
//! 発行は (パス, 有効期限, シークレット, 公開ベースURL) の純粋関数であり、
//! 内部で時刻を読まない。有効期限は呼び出し側が与えるため、固定時刻の
//! Clockの下では同一入力から常にバイト単位で同一のURLが生成される。

use hmac::{Hmac, Mac};
use mirror_types::LogicalPath;
use sha2::Sha256;

use crate::error::GatewayError;

type HmacSha256 = Hmac<Sha256>;

/// 発行された署名付きURL。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringLink {
    /// 完全なアクセスURL
    pub url: String,
    /// 有効期限のUNIXタイムスタンプ（秒）
    pub expires_at: u64,
}

/// 署名付きURLの発行・検証器。
pub struct LinkSigner {
    /// HMAC-SHA256シークレット
    secret: Vec<u8>,
    /// 発行するURLの公開ベースURL（末尾スラッシュなし）
    public_base_url: String,
}

impl LinkSigner {
    /// 新しいLinkSignerを作成する。
    ///
    /// # 引数
    /// - `secret`: HMAC-SHA256シークレット
    /// - `public_base_url`: 発行するURLの公開ベースURL（例: "https://media.example.com"）
    pub fn new(secret: Vec<u8>, public_base_url: String) -> Self {
        Self {
            secret,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 署名対象のカノニカルバイト列を構築する。
    fn sign_target(path: &LogicalPath, expires_at: u64) -> Vec<u8> {
        format!("{path}\n{expires_at}").into_bytes()
    }

    /// パスと有効期限に対するHMAC-SHA256署名を16進文字列で返す。
    fn signature_hex(&self, path: &LogicalPath, expires_at: u64) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256は任意長のシークレットを受け付ける");
        mac.update(&Self::sign_target(path, expires_at));
        hex::encode(mac.finalize().into_bytes())
    }

    /// 署名付きURLを発行する。
    ///
    /// 有効期限は呼び出し側が与える（通常は `clock.now() + ttl`）。
    /// URL形式: `{public_base_url}/content/{path}?expires={unix秒}&sig={16進署名}`
    pub fn issue(&self, path: &LogicalPath, expires_at: u64) -> ExpiringLink {
        let sig = self.signature_hex(path, expires_at);
        ExpiringLink {
            url: format!(
                "{}/content/{}?expires={}&sig={}",
                self.public_base_url, path, expires_at, sig
            ),
            expires_at,
        }
    }

    /// 署名と有効期限を検証する。
    ///
    /// 署名はHMACの定数時間比較で検証する。有効期限は与えられた現在時刻と
    /// 比較し、`expires_at`ちょうどまでを有効とする。
    pub fn verify(
        &self,
        path: &LogicalPath,
        expires_at: u64,
        sig_hex: &str,
        now: u64,
    ) -> Result<(), GatewayError> {
        let sig = hex::decode(sig_hex).map_err(|_| GatewayError::InvalidSignature)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256は任意長のシークレットを受け付ける");
        mac.update(&Self::sign_target(path, expires_at));
        mac.verify_slice(&sig)
            .map_err(|_| GatewayError::InvalidSignature)?;

        if expires_at < now {
            return Err(GatewayError::LinkExpired);
        }

        Ok(())
    }
}
