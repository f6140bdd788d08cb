use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG, CONFIG_PATH and DATABASE_URL take effect
    dotenv().ok();

    // Config decides the log format, so it is read before the subscriber exists.
    let (cfg, source) = match server::startup::load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "catalog", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.json);
    server::startup::log_config_source(&source);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "catalog",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "catalog",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        store = ?cfg.server.store,
        "catalog service starting"
    );

    // run_with_config drains connections on Ctrl+C before returning
    match rt.block_on(server::run_with_config(cfg)) {
        Ok(()) => {
            info!(service = "catalog", event = "stop", %service_id, pid, "catalog stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "catalog", event = "run_failed", error = %e, "server returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
