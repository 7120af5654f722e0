//! Checks the tracing events emitted by container operations.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use dynenum::{EnumContainer, EnumPolicy};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
}

struct CapturedGuard {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedGuard {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("log buffer lock poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedGuard {
            buf: Arc::clone(&self.buf),
        }
    }
}

fn capture(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

#[test]
fn add_reports_ignored_duplicates() {
    let output = capture(|| {
        let mut e = EnumContainer::new();
        e.add(["apple", "pear", "apple"]).unwrap();
    });
    assert!(output.contains("added enum values"), "{output}");
    assert!(output.contains("added=2"), "{output}");
    assert!(output.contains("ignored=1"), "{output}");
}

#[test]
fn key_collision_is_warned() {
    let output = capture(|| {
        let mut e = EnumContainer::new();
        e.add(json!({"apple": 1, "APPLE": 2})).unwrap();
        e.set_capitalize(true);
        assert_eq!(e.value("apple").unwrap(), &json!(2));
    });
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("collides"), "{output}");
    assert!(output.contains("key=APPLE"), "{output}");
}

#[test]
fn delete_and_reset_are_logged() {
    let output = capture(|| {
        let mut e = EnumContainer::with_policy(EnumPolicy::permissive());
        e.add(["apple", "pear"]).unwrap();
        e.delete("apple").unwrap();
        e.reset();
    });
    assert!(output.contains("delete"), "{output}");
    assert!(output.contains("removed=true"), "{output}");
    assert!(output.contains("resetting enum"), "{output}");
    assert!(output.contains("cleared=1"), "{output}");
}
