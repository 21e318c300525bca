//! Subscriber setup shared by the binary and tests.

use tracing::level_filters::LevelFilter;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::{filter_fn, FilterFn};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Layer};

/// Targets that never reach the output.
const NOISY_MODULES: [&str; 1] = ["config::"];

/// Map the `-v` count to a level: 0 warn, 1 info, 2 debug, 3+ trace.
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    }
}

pub fn module_filter() -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(|metadata| {
        !NOISY_MODULES
            .iter()
            .any(|name| metadata.target().starts_with(name))
    })
}

/// Formatted subscriber writing to `writer`, filtered at `filter`.
pub fn subscriber<W>(filter: LevelFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry().with(fmt_layer.with_filter(filter).with_filter(module_filter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_by_verbosity() {
        assert_eq!(level_filter(0), LevelFilter::WARN);
        assert_eq!(level_filter(1), LevelFilter::INFO);
        assert_eq!(level_filter(2), LevelFilter::DEBUG);
        assert_eq!(level_filter(3), LevelFilter::TRACE);
        assert_eq!(level_filter(9), LevelFilter::TRACE);
    }
}
