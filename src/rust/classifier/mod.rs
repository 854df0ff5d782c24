mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod error;
mod model;
mod ngrams;
mod params;
mod utils;
mod vectorizer;

pub use builder::ClassifierBuilder;
pub use classifier::{ClassifierBundle, ClassifierInfo, Prediction, SUSPICIOUS_THRESHOLD};
pub use error::ClassifierError;
pub use model::LogisticRegression;
pub use params::{TrainOptions, VectorizerParams};
pub use vectorizer::TfidfVectorizer;
