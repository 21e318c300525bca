use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::util::logging;

static TEST_SETUP: Once = Once::new();

/// Installs a global test subscriber once per test binary.
///
/// `RUST_LOG` wins when set, otherwise everything from this crate is traced.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("famcount=trace"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_filter(logging::module_filter())
                    .with_filter(env_filter),
            )
            .try_init();

        if installed.is_err() {
            debug!("Tracing subscriber already set");
        }
    });
}
