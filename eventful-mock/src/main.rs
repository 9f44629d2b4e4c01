use eventful_mock::run;
use eventful_mock::settings::Settings;

fn main() {
    let settings = Settings::new().expect("Failed to load settings.");

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = settings.logger.level.as_str();

            format!("eventful_mock={level},eventful_storage={level}").into()
        }))
        .init();

    match run(&settings) {
        Ok(journal) => tracing::info!(changes = journal.len(), "page session replayed"),
        Err(e) => {
            tracing::error!("Replay failed: {}", e);
            std::process::exit(1);
        }
    }
}
