//=========================================================================
// Logging
//=========================================================================
//
// One-time `env_logger` setup behind the `log` facade.
//
// Filter precedence:
//   LoggingConfig::filter → RUST_LOG → info
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Once;

use env_logger::WriteStyle;
use log::{debug, LevelFilter};

//=== LoggingConfig =======================================================

/// Logger configuration.
///
/// `filter` uses `env_logger` syntax, e.g. `"aetheric_stage=debug,warn"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

//=== init_logging ========================================================

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored, as is an already
/// installed logger from elsewhere.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(LevelFilter::Info);
            }
        }
        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            debug!("Logging initialized");
        }
    });
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::with_filter("aetheric_stage=trace"));
        init_logging(LoggingConfig::default());
        log::info!("still logging");
    }

    #[test]
    fn with_filter_keeps_default_style() {
        let config = LoggingConfig::with_filter("warn");
        assert_eq!(config.filter.as_deref(), Some("warn"));
        assert!(matches!(config.write_style, WriteStyle::Auto));
    }
}
