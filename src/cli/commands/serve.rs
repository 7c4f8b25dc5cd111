//! Serve command - run the REST service until Ctrl-C

use super::with_data_file;
use crate::app::App;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::error::BookstoreResult;
use crate::ui::{self, UiContext};
use tracing::warn;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: &Config) -> BookstoreResult<()> {
    let ctx = UiContext::detect();
    let config = with_data_file(config, args.data_file);
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    ui::intro(&ctx, "Bookstore");

    let app = App::start(&config).await?;
    let cache = app.cache();
    ui::key_value(&ctx, "Address", &format!("http://{}", bind));
    ui::key_value(&ctx, "Collection", &config.repository.root_path);
    match config.repository.data_file_path() {
        Some(path) => ui::key_value(&ctx, "Data file", &path.display().to_string()),
        None => ui::key_value(&ctx, "Data file", "none (in memory)"),
    }
    ui::key_value_status(
        &ctx,
        "Cache",
        &format!("{} book(s), listener {}", cache.len(), app.status().state()),
        cache.is_consistent(),
    );
    ui::remark(&ctx, "Press Ctrl-C to stop");

    app.serve(&bind, shutdown_signal()).await?;

    ui::outro_success(&ctx, "Bookstore stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
