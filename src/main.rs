use tracing::{error, info};

use studylog::{Application, Config, Console, Location, SessionStore};

#[tokio::main]
async fn main() {
    // Config path, then an optional start location.
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let start = args.next().unwrap_or_else(|| "/".to_string());

    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = studylog::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        studylog::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    info!("StudyLog starting");
    info!(
        "Backends: api={} users={}",
        config.api.base_url, config.api.user_base_url
    );

    let session = SessionStore::open(&config.session.path);
    let app = match Application::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to create HTTP clients: {}", e);
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    let mut ctx = app.create_context(session, Console::stdio());
    if let Err(e) = app.run(&mut ctx, Location::parse(&start, None)).await {
        error!("Terminated with error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
