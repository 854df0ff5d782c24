//! HTTP front end for the classifier.
//!
//! | Route                 | Description                                  |
//! |-----------------------|----------------------------------------------|
//! | `POST /predict`       | `{"text"}` to `{"confidence", "isSuspicious"}` |
//! | `POST /api/analyze`   | scores, scans keywords and logs a detection  |
//! | `GET /api/detections` | the detection log, newest first              |

mod error;
mod handlers;
mod state;

use std::io;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::handle::BundleHandle;

pub use error::ApiError;
pub use handlers::{AnalyzeData, AnalyzeResponse, DetectionsResponse, TextRequest};
pub use state::{AppState, Detection};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/detections", get(handlers::detections))
        .with_state(state)
}

/// Serves on an already bound listener until the task is dropped.
pub async fn serve_on(
    listener: TcpListener,
    classifier: Arc<BundleHandle>,
    threshold: f64,
) -> io::Result<()> {
    let state = Arc::new(AppState::new(classifier, threshold));
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

pub async fn serve(
    addr: std::net::SocketAddr,
    classifier: Arc<BundleHandle>,
    threshold: f64,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, classifier, threshold).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierBuilder;

    fn state() -> AppState {
        let bundle = ClassifierBuilder::new().with_corpus().build().unwrap();
        AppState::new(Arc::new(BundleHandle::new(bundle)), 0.7)
    }

    #[test]
    fn test_record_prepends_with_sequential_ids() {
        let state = state();
        state.record("first".into(), 0.1, vec![]);
        state.record("second".into(), 0.9, vec!["plug".into()]);

        let log = state.detections();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].content, "second");
        assert_eq!(log[0].id, 2);
        assert_eq!(log[1].id, 1);
        assert_eq!(log[0].platform, "manual");
        assert_eq!(log[0].status, "reviewed");
    }

    #[test]
    fn test_analyze_data_flattens_detection() {
        let detection = state().record("dm me".into(), 0.8, vec!["DM".into()]);
        let json = serde_json::to_value(AnalyzeData {
            detection,
            is_suspicious: true,
            warning: None,
        })
        .unwrap();

        assert_eq!(json["content"], "dm me");
        assert_eq!(json["isSuspicious"], true);
        assert_eq!(json["keywords"][0], "DM");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        assert!(json.get("warning").is_none());
    }
}
