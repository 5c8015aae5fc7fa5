//! Failed checks report the caller's location, not the library's.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crab_own::ExclusiveOwner;

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f`, expect it to fail a check, and return what was logged.
fn failing_check_log(f: impl FnOnce()) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    let result =
        tracing::subscriber::with_default(subscriber, || panic::catch_unwind(AssertUnwindSafe(f)));
    assert!(result.is_err(), "check did not fire");
    let bytes = log.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn out_of_bounds_read_names_the_call_site() {
    let owner = ExclusiveOwner::<[u32]>::make_array(3);
    let mut line = 0;
    let output = failing_check_log(|| {
        line = line!() + 1;
        let _value: u32 = owner[3];
    });
    assert!(output.contains("index out of bounds: index 3, length 3"), "{output}");
    assert!(output.contains("check_locations.rs"), "{output}");
    assert!(output.contains(&format!("line={line}")), "{output}");
}

#[test]
fn out_of_bounds_write_names_the_call_site() {
    let mut owner = ExclusiveOwner::<[u32]>::make_array(2);
    let mut line = 0;
    let output = failing_check_log(|| {
        line = line!() + 1;
        owner[5] = 1;
    });
    assert!(output.contains("index 5, length 2"), "{output}");
    assert!(output.contains("check_locations.rs"), "{output}");
    assert!(output.contains(&format!("line={line}")), "{output}");
}
