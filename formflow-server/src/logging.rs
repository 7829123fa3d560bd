use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: &[&str] = &[
    "formflow_server",
    "formflow_service",
    "formflow_postgres",
];

/// Default directives used when `RUST_LOG` is unset.
pub fn default_filter(log_level: &str) -> String {
    let mut directives: Vec<String> = CRATES.iter().map(|c| format!("{c}={log_level}")).collect();
    directives.push("tower_http=info".to_string());
    directives.join(",")
}

/// Install the global subscriber. `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
