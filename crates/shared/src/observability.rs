//! # ロギング初期化
//!
//! tracing サブスクライバをプロセス起動時に一度だけ構成する。
//! 出力形式は環境変数 `LOG_FORMAT`、レベルフィルタは `RUST_LOG` で制御する。

use std::{fmt, str::FromStr};

/// ログの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON（ログ収集基盤向け）
    Json,
    /// 人間が読む開発環境向けの出力
    #[default]
    Pretty,
}

/// 認識できない `LOG_FORMAT` 値
#[derive(Debug)]
pub struct UnknownLogFormat(String);

impl fmt::Display for UnknownLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "不明なログ形式です: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLogFormat {}

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// 環境変数 `LOG_FORMAT` から出力形式を決定する
    ///
    /// 未設定なら [`Pretty`](Self::Pretty)。認識できない値も
    /// [`Pretty`](Self::Pretty) に倒し、stderr に警告を出す
    /// （この時点ではサブスクライバが未初期化のため tracing は使えない）。
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var("LOG_FORMAT") else {
            return Self::default();
        };

        raw.parse().unwrap_or_else(|err| {
            eprintln!("WARNING: {err}。pretty を使用します");
            Self::Pretty
        })
    }
}

/// tracing サブスクライバを初期化する
///
/// レベルフィルタは `RUST_LOG`、未設定なら `info,dodai=debug`。
/// グローバルサブスクライバの登録は一度しかできないため、
/// `main` の先頭で一度だけ呼ぶ。
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,dodai=debug".into());

    let output = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_既知の形式名がパースできる() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_不明な形式名はエラーになる() {
        let err = "JSON".parse::<LogFormat>().unwrap_err();
        assert_eq!(format!("{err}"), r#"不明なログ形式です: "JSON""#);

        assert!("".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_デフォルトはprettyである() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
