use std::sync::Arc;

use color_eyre::Result;
use lotto_pick::{AppContext, Config};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Load .env (optional). OPENAI_API_KEY and LOTTO_* settings may come from it.
    let _ = dotenvy::dotenv();

    // ログ: 標準出力は使わず、ファイルへのみ出力してratatuiと衝突しないようにする
    let file_appender = rolling::daily("logs", "app.log");
    // guard はdropするとログが失われるため、main の終わりまで保持
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // ファイルにANSIカラー不要
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    let config = Config::from_env();
    tracing::info!(target: "app", model = %config.model, catalog = ?config.catalog_path, "starting");
    let ctx = Arc::new(AppContext::from_config(config)?.with_env_credential());

    let terminal = ratatui::init();
    let res = lotto_pick::run(terminal, ctx);
    ratatui::restore();
    res
}
