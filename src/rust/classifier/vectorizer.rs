use std::collections::{BTreeMap, HashMap};

use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::ngrams::{count_ngrams, tokenize};
use super::params::VectorizerParams;
use super::utils::normalize_vector;
use crate::preprocess::preprocess;

/// TF-IDF weighted n-gram features over preprocessed text.
///
/// The vocabulary is fixed by [`TfidfVectorizer::fit`]; n-grams first seen at
/// transform time are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    params: VectorizerParams,
    /// n-gram to feature index, indices assigned in lexicographic order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<T: AsRef<str>>(texts: &[T], params: VectorizerParams) -> Self {
        debug!("Fitting TfidfVectorizer on {} texts", texts.len());
        let doc_counts = Self::count_documents(texts, &params);

        let mut df: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for ngram in counts.keys() {
                *df.entry(ngram.as_str()).or_insert(0) += 1;
            }
        }
        let observed = df.len();

        let kept: BTreeMap<&str, usize> = df
            .into_iter()
            .filter(|(_, doc_freq)| *doc_freq >= params.min_df)
            .collect();
        debug!(
            "Vocabulary filtered by min_df={}: {} -> {} n-grams",
            params.min_df,
            observed,
            kept.len()
        );

        // idf = ln((n_docs + 1) / (df + 1)) + 1
        let n_docs = texts.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, (ngram, doc_freq)) in kept.into_iter().enumerate() {
            vocabulary.insert(ngram.to_string(), idx);
            idf.push(((n_docs + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0);
        }

        debug!("TfidfVectorizer fitted with {} features", vocabulary.len());
        Self {
            params,
            vocabulary,
            idf,
        }
    }

    /// Maps one message to its L2-normalized TF-IDF vector.
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let processed = preprocess(text);
        let tokens = tokenize(&processed);
        let (min_n, max_n) = self.params.ngram_range;

        let mut features = Array1::zeros(self.num_features());
        for (ngram, count) in count_ngrams(&tokens, min_n, max_n) {
            if let Some(&idx) = self.vocabulary.get(&ngram) {
                features[idx] = count as f64 * self.idf[idx];
            }
        }
        normalize_vector(&features)
    }

    pub fn transform_batch<T: AsRef<str>>(&self, texts: &[T]) -> Vec<Array1<f64>> {
        texts.iter().map(|text| self.transform(text.as_ref())).collect()
    }

    pub fn fit_transform<T: AsRef<str>>(
        texts: &[T],
        params: VectorizerParams,
    ) -> (Self, Vec<Array1<f64>>) {
        let vectorizer = Self::fit(texts, params);
        let transformed = vectorizer.transform_batch(texts);
        (vectorizer, transformed)
    }

    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// IDF weight of an n-gram, if it is part of the vocabulary.
    pub fn idf(&self, ngram: &str) -> Option<f64> {
        self.vocabulary.get(ngram).map(|&idx| self.idf[idx])
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    /// Checks that the vocabulary and IDF table agree; used after deserialization.
    pub(crate) fn is_consistent(&self) -> bool {
        self.vocabulary.len() == self.idf.len()
            && self.vocabulary.values().all(|&idx| idx < self.idf.len())
    }

    fn count_documents<T: AsRef<str>>(
        texts: &[T],
        params: &VectorizerParams,
    ) -> Vec<HashMap<String, usize>> {
        let (min_n, max_n) = params.ngram_range;
        texts
            .iter()
            .map(|text| {
                let processed = preprocess(text.as_ref());
                count_ngrams(&tokenize(&processed), min_n, max_n)
            })
            .collect()
    }
}
