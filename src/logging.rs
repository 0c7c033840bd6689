//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(default);
    // A logger may already be installed when embedded; keep the existing one.
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}
