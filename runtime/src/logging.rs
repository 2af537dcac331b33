use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Install a global fmt subscriber writing to stderr, filtered by
/// `settings.log_filter`. An unparsable filter falls back to `warn`.
///
/// Returns false when a global subscriber was already installed.
pub fn init_logging(settings: &Settings) -> bool {
    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_existing_subscriber() {
        let bad_filter = Settings {
            log_filter: "graphrt=[".to_string(),
            ..Settings::default()
        };
        // Only call site in this test binary; an unparsable filter still installs.
        assert!(init_logging(&bad_filter));
        assert!(!init_logging(&Settings::default()));
    }
}
