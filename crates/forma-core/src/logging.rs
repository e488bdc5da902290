//! Logging integration for the forma form library.
//!
//! Provides helpers for configuring [`tracing`]-based logging and for
//! creating per-binding-pass spans.

/// Logging configuration.
///
/// `filter` uses the `tracing_subscriber::EnvFilter` syntax (e.g. `"info"`,
/// `"forma_forms=debug"`).
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether to use the pretty human-readable format instead of JSON.
    pub debug: bool,
    /// The log filter directive.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            filter: "info".to_string(),
        }
    }
}

/// Sets up the global tracing subscriber from the given configuration.
///
/// In debug mode a pretty, human-readable format is used; otherwise a
/// structured JSON format is used. Installing a second subscriber is a
/// no-op rather than an error, so tests can call this freely.
pub fn setup_logging(config: &LogConfig) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one binding pass over a form.
///
/// Attach this span around `FormBinder::is_valid` so that all field-level
/// log entries carry the form type.
///
/// # Examples
///
/// ```
/// use forma_core::logging::binding_span;
///
/// let span = binding_span("LoginForm");
/// let _guard = span.enter();
/// tracing::debug!("binding submitted values");
/// ```
pub fn binding_span(form_type: &str) -> tracing::Span {
    tracing::debug_span!("binding", form = form_type)
}
