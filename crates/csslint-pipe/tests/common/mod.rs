#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use csslint_pipe::{FileRecord, Logger};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures().join(name)
}

/// Reads a fixture with its directory as base, so `relative()` is the file name.
pub async fn get_file(name: &str) -> FileRecord {
    let path = fixture(name);
    let base = path.parent().map(PathBuf::from).unwrap_or_else(fixtures);
    FileRecord::read(path.clone())
        .await
        .expect("fixture exists")
        .with_base(base)
}

/// A logger that records every chunk it receives.
pub fn spy() -> (Logger, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let logger = Logger::custom(move |chunk| sink.lock().unwrap().push(chunk.to_string()));
    (logger, calls)
}
