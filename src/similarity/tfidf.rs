use hashbrown::HashMap;
use itertools::Itertools;
use rayon::prelude::*;

use crate::similarity::tokenizer::Tokenizer;

pub type TermId = u32;

/// Sparse document vector, ordered by ascending term id.
pub type SparseRow = Vec<(TermId, f64)>;

pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
}

/// Term weights for every document of a fitted corpus.
///
/// Each row is either L2-normalised or all-zero (a document without any vocabulary term).
pub struct TfidfMatrix {
    vocabulary: HashMap<String, TermId>,
    rows: Vec<SparseRow>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(Tokenizer::english())
    }
}

impl TfidfVectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        TfidfVectorizer { tokenizer }
    }

    /// Learns the vocabulary and smoothed idf weights from `documents` and returns their
    /// tf-idf rows.
    ///
    /// Weighting: raw term count times `ln((1 + n) / (1 + df)) + 1`, followed by L2
    /// normalisation per row. An empty vocabulary is not an error; all rows are then zero.
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> TfidfMatrix {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|document| self.tokenizer.tokenize(document.as_ref()))
            .collect();

        // Term ids follow lexical order so the layout is independent of document order.
        let vocabulary: HashMap<String, TermId> = tokenized
            .iter()
            .flatten()
            .unique()
            .sorted()
            .enumerate()
            .map(|(term_id, term)| (term.clone(), term_id as TermId))
            .collect();

        let term_counts: Vec<HashMap<TermId, usize>> = tokenized
            .par_iter()
            .map(|tokens| {
                let mut counts = HashMap::with_capacity(tokens.len());
                for token in tokens {
                    *counts.entry(vocabulary[token]).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut document_frequency = vec![0_usize; vocabulary.len()];
        for counts in term_counts.iter() {
            for term_id in counts.keys() {
                document_frequency[*term_id as usize] += 1;
            }
        }

        let num_documents = documents.len();
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| smoothed_idf(num_documents, *df))
            .collect();

        let rows: Vec<SparseRow> = term_counts
            .into_par_iter()
            .map(|counts| {
                let mut row: SparseRow = counts
                    .into_iter()
                    .map(|(term_id, count)| (term_id, count as f64 * idf[term_id as usize]))
                    .collect();
                row.sort_unstable_by_key(|(term_id, _)| *term_id);
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfidfMatrix { vocabulary, rows }
    }
}

impl TfidfMatrix {
    pub fn num_documents(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub(crate) fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    pub fn row(&self, document: usize) -> &[(TermId, f64)] {
        &self.rows[document]
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    /// Inverted index: for every term, the documents containing it with their weight.
    pub(crate) fn postings(&self) -> Vec<Vec<(usize, f64)>> {
        let mut postings = vec![Vec::new(); self.vocabulary.len()];
        for (document, row) in self.rows.iter().enumerate() {
            for (term_id, weight) in row {
                postings[*term_id as usize].push((document, *weight));
            }
        }
        postings
    }
}

pub(crate) fn smoothed_idf(num_documents: usize, document_frequency: usize) -> f64 {
    ((1 + num_documents) as f64 / (1 + document_frequency) as f64).ln() + 1.0
}

fn l2_normalize(row: &mut SparseRow) {
    let norm = row.iter().map(|(_, weight)| weight * weight).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in row.iter_mut() {
            *weight /= norm;
        }
    }
}
