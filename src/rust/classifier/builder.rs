use log::{error, info};

use super::classifier::ClassifierBundle;
use super::error::ClassifierError;
use super::model::LogisticRegression;
use super::params::{TrainOptions, VectorizerParams};
use super::vectorizer::TfidfVectorizer;
use crate::corpus::{training_examples, TrainingExample};

/// A builder for fitting a ClassifierBundle with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    examples: Vec<TrainingExample>,
    vectorizer_params: VectorizerParams,
    train_options: TrainOptions,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use drugwatch::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            examples: Vec::new(),
            vectorizer_params: VectorizerParams::default(),
            train_options: TrainOptions::default(),
        }
    }

    /// Adds the built-in labelled corpus.
    pub fn with_corpus(mut self) -> Self {
        self.examples.extend(training_examples());
        self
    }

    /// Sets the n-gram range and document-frequency cutoff for the vectorizer
    pub fn with_vectorizer_params(mut self, params: VectorizerParams) -> Self {
        self.vectorizer_params = params;
        self
    }

    /// Sets the optimizer configuration for the logistic regression
    pub fn with_train_options(mut self, options: TrainOptions) -> Self {
        self.train_options = options;
        self
    }

    /// Adds one labelled message.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if
    ///   the label is not 0 or 1
    ///
    /// # Example
    /// ```
    /// use drugwatch::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .add_example("need plug in nyc", 1)?
    ///     .add_example("gardening hobby", 0)?;
    /// # Ok::<(), drugwatch::ClassifierError>(())
    /// ```
    pub fn add_example(mut self, text: impl Into<String>, label: u8) -> Result<Self, ClassifierError> {
        Self::validate_label(self.examples.len(), label)?;
        self.examples.push(TrainingExample::new(text, label));
        Ok(self)
    }

    /// Adds labelled messages in order.
    pub fn add_examples<I>(mut self, examples: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = TrainingExample>,
    {
        for example in examples {
            Self::validate_label(self.examples.len(), example.label)?;
            self.examples.push(example);
        }
        Ok(self)
    }

    fn validate_label(position: usize, label: u8) -> Result<(), ClassifierError> {
        if label > 1 {
            return Err(ClassifierError::ValidationError(format!(
                "Example {} has label {}, expected 0 or 1",
                position + 1,
                label
            )));
        }
        Ok(())
    }

    /// Fits the vectorizer and the model, and returns the bundle
    ///
    /// # Returns
    /// * `Result<ClassifierBundle, ClassifierError>` - The fitted bundle if successful, or an error if:
    ///   - No examples have been added
    ///   - Only one label is present
    ///   - The optimizer rejected its input
    pub fn build(self) -> Result<ClassifierBundle, ClassifierError> {
        if self.examples.is_empty() {
            return Err(ClassifierError::ValidationError(
                "At least one training example must be added".to_string(),
            ));
        }
        let suspicious = self.examples.iter().filter(|e| e.is_suspicious()).count();
        if suspicious == 0 || suspicious == self.examples.len() {
            return Err(ClassifierError::ValidationError(
                "Training examples must include both suspicious and benign messages".to_string(),
            ));
        }

        info!(
            "Fitting classifier on {} examples ({} suspicious)",
            self.examples.len(),
            suspicious
        );

        let texts: Vec<&str> = self.examples.iter().map(|e| e.text.as_str()).collect();
        let labels: Vec<u8> = self.examples.iter().map(|e| e.label).collect();

        let (vectorizer, features) = TfidfVectorizer::fit_transform(&texts, self.vectorizer_params);
        if vectorizer.num_features() == 0 {
            error!("Training texts produced an empty vocabulary");
            return Err(ClassifierError::TrainingError(
                "Training texts produced no features".to_string(),
            ));
        }
        info!("Vocabulary built with {} n-grams", vectorizer.num_features());

        let model = LogisticRegression::fit(&features, &labels, &self.train_options)?;
        ClassifierBundle::new(vectorizer, model)
    }
}
