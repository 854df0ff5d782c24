//! Flags chat messages that look like drug-sale solicitations.
//!
//! Text is normalized (lowercased, street slang and emoji rewritten to plain
//! keywords), vectorized with TF-IDF over word 1- to 3-grams and scored by a
//! logistic regression. Messages scoring above 0.7 are reported as suspicious.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use drugwatch::{ClassifierBundle, SUSPICIOUS_THRESHOLD};
//!
//! let classifier = ClassifierBundle::builder().with_corpus().build()?;
//!
//! let prediction = classifier.classify("need plug in nyc dm for menu", SUSPICIOUS_THRESHOLD)?;
//! println!("{}", prediction);
//! # Ok(())
//! # }
//! ```
//!
//! # Persistence
//!
//! A fitted bundle is saved once and reloaded by long-running services:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use drugwatch::{ArtifactStore, BundleHandle, ClassifierBundle};
//!
//! # let dir = tempfile::tempdir()?;
//! let store = ArtifactStore::new(dir.path())?;
//! store.save(&ClassifierBundle::builder().with_corpus().build()?)?;
//!
//! let handle = BundleHandle::load(store)?;
//! let confidence = handle.get().predict("just posting about my gardening hobby")?;
//! assert!(confidence < 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! A bundle is immutable once built and can be shared across threads with `Arc`.

pub mod artifact;
pub mod classifier;
pub mod corpus;
pub mod handle;
pub mod keywords;
pub mod preprocess;
mod runtime;
pub mod server;

pub use artifact::{predict_from_artifact, ArtifactError, ArtifactStore};
pub use classifier::{
    ClassifierBuilder, ClassifierBundle, ClassifierError, ClassifierInfo, Prediction, TrainOptions,
    VectorizerParams, SUSPICIOUS_THRESHOLD,
};
pub use handle::BundleHandle;
pub use keywords::{detect_keywords, heuristic_confidence};
pub use preprocess::preprocess;
pub use runtime::{ensure_logger_initialized, RuntimeConfig, DEFAULT_HOST, DEFAULT_PORT};
