use anyhow::Result;
use tui_wellness_app::config::AppConfig;
use tui_wellness_app::internal::prefs::PrefStore;
use tui_wellness_app::internal::ui::app::App;
use tui_wellness_app::tui;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();

    // Where tracing writes depends on who owns the terminal: once the TUI has
    // the screen, stdout/stderr logging would scribble over it, so logs go to
    // a rolling file. If the terminal cannot be taken over at all, log to the
    // console instead so the failure is actually visible.
    match tui::init() {
        Ok(terminal) => {
            let log_dir = config.logging.log_directory.as_deref().unwrap_or("logs");
            let file_appender = tracing_appender::rolling::daily(log_dir, "tui-wellness-app.log");
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

            // RUST_LOG takes precedence over the configured level.
            let env_filter = match std::env::var("RUST_LOG") {
                Ok(_) => tracing_subscriber::EnvFilter::from_default_env(),
                Err(_) => tracing_subscriber::EnvFilter::new(config.logging.level.clone()),
            };

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact()
                .init();

            let prefs = PrefStore::open();
            let mut app = App::new(config, prefs);
            let res = app.run(terminal).await;

            // Hand the terminal back before reporting anything.
            tui::restore()?;

            if let Err(err) = res {
                // Short version to stderr; the log file has the full trace.
                eprintln!("{err:?}");
            }

            Ok(())
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();

            eprintln!("could not initialize the terminal UI: {e:?}");
            Err(e.into())
        }
    }
}
