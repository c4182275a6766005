use thiserror::Error;
use tracing_subscriber::{filter::ParseError, util::TryInitError, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{filter}`: {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
    #[error("global tracing subscriber already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// `RUST_LOG` wins when set; otherwise `default_filter` applies.
pub fn build_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_filter).map_err(|source| LoggingError::InvalidFilter {
        filter: default_filter.to_owned(),
        source,
    })
}

/// Installs the global subscriber. Output goes to stderr.
pub fn init_tracing(default_filter: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = build_filter(default_filter)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn accepts_target_directives() {
        assert!(build_filter("info,runtime=debug").is_ok());
    }
}
