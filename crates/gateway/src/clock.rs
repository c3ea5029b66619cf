//! # 時刻ソース
//!
//! 現在時刻の取得を抽象化する。
//! 本番ではシステム時計を読み、テストでは固定時刻のClockに差し替えることで、
//! 有効期限を埋め込んだURLの生成を決定的にする。
//!
//! ## 実装
//! - `SystemClock`: システム時計を読む（本番用）
//! - `ManualClock`: 固定時刻を保持し、明示的に進める（開発・テスト用）

use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// 現在時刻をUNIXタイムスタンプ（秒）で返すトレイト。
///
/// 1回のリクエスト処理の中で`now()`は1度だけ読むこと。
/// 処理の途中で時刻が進むと、有効期限の計算結果が読み取りごとにずれる。
pub trait Clock: Send + Sync {
    /// 現在時刻をUNIXタイムスタンプ（秒）で返す。
    fn now(&self) -> u64;
}

/// システム時計を読む本番用Clock。固定機能は持たない。
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("システム時刻がUNIXエポック以前です")
            .as_secs()
    }
}

/// 固定時刻を保持する開発・テスト用Clock。
///
/// `freeze`で固定した時刻は`advance`で明示的に進めるまで変わらず、
/// 読むたびに同一の値が返る。プロセスグローバルには持たず、
/// テストごとにインスタンスを生成して注入する。
pub struct ManualClock {
    /// 固定されている現在時刻（UNIX秒）
    pinned: RwLock<u64>,
}

impl ManualClock {
    /// 指定時刻で固定されたClockを生成する。
    pub fn frozen_at(instant: u64) -> Self {
        Self {
            pinned: RwLock::new(instant),
        }
    }

    /// 固定時刻を指定時刻に設定し直す。
    pub fn freeze(&self, instant: u64) {
        *self.pinned.write().unwrap() = instant;
    }

    /// 固定時刻を指定秒数だけ進める。
    pub fn advance(&self, secs: u64) {
        *self.pinned.write().unwrap() += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.pinned.read().unwrap()
    }
}
