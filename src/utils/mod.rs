pub mod build_info;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

/// Installs the global subscriber. Logs go to stderr so command output stays clean;
/// `RUST_LOG` directives are honoured on top of `madbudget=info`.
pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "madbudget=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
