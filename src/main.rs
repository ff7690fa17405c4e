use clap::Parser;
use distserve::{cli, config, logger, server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();

    let config = config::ServerConfig::from_args(&args)
        .map_err(|e| format!("failed to enter dist directory: {e}"))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: config::ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr();

    // Bind failure (port in use, bad address, missing permission) is fatal
    let listener = server::create_listener(addr).map_err(|e| format!("failed to bind {addr}: {e}"))?;

    let config = Arc::new(config);
    logger::log_server_start(&listener.local_addr()?, &config);

    tokio::select! {
        result = server::run_accept_loop(listener, Arc::clone(&config)) => Ok(result?),
        _ = tokio::signal::ctrl_c() => {
            logger::log_shutdown();
            Ok(())
        }
    }
}
