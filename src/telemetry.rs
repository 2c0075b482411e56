//! Logging initialization

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "ragapi=info,ragapi_core=info,ragapi_openai=info,ragapi_rag=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = installed {
        eprintln!("logging already initialized: {}", e);
    }
}
