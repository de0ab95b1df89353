use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "daycal_core=info,daycal_cli=info,warn";
const DEBUG_FILTER: &str = "daycal_core=debug,daycal_cli=debug,info";

/// Log to stderr. `RUST_LOG` takes precedence over `--debug`.
pub fn init(debug: bool) {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
