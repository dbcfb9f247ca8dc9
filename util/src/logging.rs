use std::env;

use env_logger::Builder;
use error_chain::ChainedError;

use errors::*;

// Engine and job progress is logged at info; per partition detail stays at debug.
const DEFAULT_LOG_CONFIG: &str = "info";

/// Sets up `env_logger`, reading the filter from `RUST_LOG` when it is set.
pub fn init_logger() -> Result<()> {
    let log_config = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_owned());

    Builder::new()
        .parse(&log_config)
        .try_init()
        .chain_err(|| "Failed to build env_logger")?;
    Ok(())
}

/// Logs `err` followed by every error in its chain and, when captured, its backtrace.
pub fn output_error<E: ChainedError>(err: &E) {
    error!("{}", err);

    for e in err.iter().skip(1) {
        error!("caused by: {}", e);
    }

    if let Some(backtrace) = err.backtrace() {
        error!("backtrace: {:?}", backtrace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_can_only_be_installed_once() {
        let _ = init_logger();

        assert!(init_logger().is_err());
    }

    #[test]
    fn output_error_accepts_chained_errors() {
        let err: Error = Error::from("inner").chain_err(|| "outer");

        output_error(&err);

        assert_eq!(2, err.iter().count());
    }
}
