// ログ初期化と表示用ユーティリティ

use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_manager::{default_log_dir, LogConfig};

/// ログ初期化
///
/// `RUST_LOG`が設定されていればそちらを優先する。ファイル出力を有効にした場合、
/// 戻り値のガードを保持している間だけバッファが書き出される。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let (file_layer, guard) = if config.enable_file_logging {
        let log_dir = match &config.log_dir {
            Some(dir) => dir.clone(),
            None => default_log_dir()?,
        };
        std::fs::create_dir_all(&log_dir)?;

        let appender = tracing_appender::rolling::daily(&log_dir, "callcoach.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// エラー詳細のログ
pub fn log_error_with_context(error: &anyhow::Error, context: &str) {
    error!(
        context = context,
        error = %error,
        error_chain = ?error.chain().map(|e| e.to_string()).collect::<Vec<_>>(),
        "❌ Error occurred"
    );
}

/// 対応時間を表示用に整形
pub fn format_duration(duration_secs: Option<u32>) -> String {
    match duration_secs {
        Some(secs) => format!("{}m {:02}s", secs / 60, secs % 60),
        None => "-".to_string(),
    }
}

/// 平均評価を表示用に整形
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{:.1}/5.0", value),
        None => "N/A".to_string(),
    }
}
