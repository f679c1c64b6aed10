use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod users;

fn main() {
    let config_path = config_path_from_args(std::env::args().skip(1));

    let cfg = match config::Config::load_from(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[ERROR] Failed to load configuration '{config_path}': {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logger::init(&cfg) {
        eprintln!("[ERROR] Failed to open log files: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cfg) {
        logger::log_server_error(&e);
        std::process::exit(1);
    }
}

/// Build the runtime and serve until shutdown
fn run(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    // Worker threads only back blocking file I/O and timers, request
    // handling itself stays on the LocalSet thread
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    logger::log_server_start(&addr, &cfg);

    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state, shutdown)).await?;
    Ok(())
}

/// Config file path from `-c <path>` / `--config <path>`, defaulting to `config`
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> String {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                if let Some(path) = args.next() {
                    return path;
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    return path.to_string();
                }
            }
        }
    }
    config::DEFAULT_CONFIG_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_config_path_from_args() {
        assert_eq!(config_path_from_args(args(&[])), "config");
        assert_eq!(config_path_from_args(args(&["-c", "prod.toml"])), "prod.toml");
        assert_eq!(config_path_from_args(args(&["--config=dev"])), "dev");
        assert_eq!(config_path_from_args(args(&["--config"])), "config");
    }
}
