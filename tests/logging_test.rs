//! Log output of the binary's subscriber at different verbosity levels

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use famcount::domain::{aggregate, TreeBuilder};
use famcount::util::logging;

/// In-memory log sink for one test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let buf = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.0.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_with_verbosity(verbosity: u8) -> String {
    let captured = Captured::default();
    let sink = captured.clone();
    let subscriber = logging::subscriber(logging::level_filter(verbosity), move || sink.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut tree = TreeBuilder::new()
            .build_from_file(Path::new("tests/resources/three_level.toml"))
            .unwrap();
        aggregate(&mut tree).unwrap();
    });

    captured.text()
}

#[test]
fn given_default_verbosity_when_building_from_file_then_no_debug_output() {
    let out = run_with_verbosity(0);

    assert!(!out.contains("DEBUG"), "unexpected debug output:\n{out}");
    assert!(!out.contains("built family tree"), "unexpected debug output:\n{out}");
}

#[test]
fn given_debug_verbosity_when_building_from_file_then_build_is_logged() {
    let out = run_with_verbosity(2);

    assert!(out.contains("built family tree"), "missing debug output:\n{out}");
    // field names may carry ansi styling, so only look for the name
    assert!(out.contains("depth"), "missing depth field:\n{out}");
    assert!(!out.contains("TRACE"), "trace leaked at debug level:\n{out}");
}
