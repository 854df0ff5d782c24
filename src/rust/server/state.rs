use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::handle::BundleHandle;

/// One analyzed message as kept in the detection log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: u64,
    pub platform: String,
    pub content: String,
    pub confidence: f64,
    pub keywords: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub status: String,
}

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    pub classifier: Arc<BundleHandle>,
    pub threshold: f64,
    detections: Mutex<Vec<Detection>>,
}

impl AppState {
    pub fn new(classifier: Arc<BundleHandle>, threshold: f64) -> Self {
        Self {
            classifier,
            threshold,
            detections: Mutex::new(Vec::new()),
        }
    }

    /// Stores a manual detection at the front of the log and returns it.
    pub fn record(&self, content: String, confidence: f64, keywords: Vec<String>) -> Detection {
        let mut log = self.lock();
        let detection = Detection {
            id: log.len() as u64 + 1,
            platform: "manual".to_string(),
            content,
            confidence,
            keywords,
            timestamp: OffsetDateTime::now_utc(),
            status: "reviewed".to_string(),
        };
        log.insert(0, detection.clone());
        detection
    }

    /// Snapshot of the log, newest first.
    pub fn detections(&self) -> Vec<Detection> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Detection>> {
        match self.detections.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
