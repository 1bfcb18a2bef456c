use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use devserve::{config, logger, server};

/// How long in-flight responses get once the accept loop has stopped
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async_main(cfg));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let root = cfg.resolve_root()?;
    logger::init(&cfg)?;

    let listener = match server::create_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    logger::log_server_start(&addr, &root, &cfg);

    let access_log = Box::new(logger::FormattedAccessLog::new(
        cfg.logging.access_log_format.clone(),
    ));
    let state = Arc::new(config::AppState::new(cfg, root, access_log));

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    server::start_server_loop(listener, state, shutdown).await?;

    logger::log_shutdown();
    Ok(())
}
