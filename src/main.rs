//! cam: list cameras, pick one, and wait for Ctrl+C.

use env_logger::Env;

use cam::app::{self, EXIT_FAILURE};
use cam::camera::CameraManager;
use cam::cli::{parse_options, ParseOutcome};
use cam::config::{self, Config, LogConfig};
use cam::signal::setup_interrupt_handler;

fn init_logging(config: &LogConfig) {
    env_logger::Builder::from_env(Env::default().default_filter_or(config.filter.as_str()))
        .init();
}

fn main() {
    let options = match parse_options(std::env::args_os()) {
        ParseOutcome::Run(options) => options,
        ParseOutcome::Usage(usage) => {
            print!("{}", usage);
            std::process::exit(EXIT_FAILURE);
        }
        ParseOutcome::Invalid(message) => {
            print!("{}", message);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let config_path = config::resolve_path();
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config.log);
    if let Some(e) = config_error {
        log::warn!("{}; using defaults", e);
    }
    log::debug!("Using configuration {:?}", config);

    let mut manager = CameraManager::from_config(&config.manager);
    let code = app::run(&options, &mut manager, &mut std::io::stdout(), |handle| {
        setup_interrupt_handler(handle);
    });
    drop(manager);

    std::process::exit(code);
}
