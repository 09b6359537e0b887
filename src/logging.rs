use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LOGLINK_LOG";

pub fn default_filter(component: &str) -> String {
    format!("info,loglink=info,{component}=info")
}

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init_tracing(component: &str) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter(component)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
