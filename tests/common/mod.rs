#![allow(dead_code)]

use async_trait::async_trait;
use petframe::domain::pet::Fid;
use petframe::domain::ports::Notifier;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Writes `rows` feed requests for a single pet, one second apart.
pub fn generate_requests(path: &Path, fid: &str, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["fid", "action", "item", "now"])?;

    for i in 1..=rows {
        wtr.write_record([fid, "feed", "", &(i * 1000).to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Notifier that keeps every message it was asked to deliver.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, fid: &Fid, message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((fid.to_string(), message.to_string()));
    }
}
