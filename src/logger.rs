use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber.
///
/// `RUST_LOG` directives win when present. Without them the level is `info`,
/// or `debug` when `verbose` is set.
pub fn init(verbose: bool) {
    let env_filter = filter_for(verbose, &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default());

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events_for(&env_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, directives: &str) -> EnvFilter {
    let default_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(directives)
}

/// Span close events carry the per-stage timings; they are only worth the
/// noise once debug output is on.
fn span_events_for(filter: &EnvFilter) -> FmtSpan {
    match filter.max_level_hint() {
        Some(level) if level >= LevelFilter::DEBUG => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_quiet() {
        let filter = filter_for(false, "");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(span_events_for(&filter), FmtSpan::NONE);
    }

    #[test]
    fn test_verbose_enables_span_timings() {
        let filter = filter_for(true, "");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(span_events_for(&filter), FmtSpan::CLOSE);
    }

    #[test]
    fn test_directives_override_verbose() {
        let filter = filter_for(true, "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(span_events_for(&filter), FmtSpan::NONE);
    }

    #[test]
    fn test_trace_directive_counts_as_debug() {
        let filter = filter_for(false, "bitonal_life_rs=trace");
        assert_eq!(span_events_for(&filter), FmtSpan::CLOSE);
    }
}
