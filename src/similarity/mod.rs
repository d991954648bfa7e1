use rayon::prelude::*;

use crate::io::Restaurant;
use crate::similarity::tfidf::{TfidfMatrix, TfidfVectorizer};

pub mod tfidf;
pub mod tokenizer;

/// Dense, square, row-major similarity matrix between restaurants.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn zeros(size: usize) -> Self {
        SimilarityMatrix {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Pairwise dot products of the tf-idf rows. Rows are L2-normalised, so this is the
    /// cosine similarity.
    pub fn linear_kernel(tfidf: &TfidfMatrix) -> Self {
        let size = tfidf.num_documents();
        let mut matrix = SimilarityMatrix::zeros(size);
        if size == 0 {
            return matrix;
        }

        let postings = tfidf.postings();
        matrix
            .values
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(document, similarities)| {
                for (term_id, weight) in tfidf.row(document) {
                    for (other, other_weight) in &postings[*term_id as usize] {
                        similarities[*other] += weight * other_weight;
                    }
                }
            });
        matrix
    }

    /// Element-wise mean of two matrices of equal size.
    pub fn average(left: &SimilarityMatrix, right: &SimilarityMatrix) -> Self {
        debug_assert_eq!(left.size, right.size);
        let values = left
            .values
            .par_iter()
            .zip(right.values.par_iter())
            .map(|(l, r)| (l + r) / 2.0)
            .collect();
        SimilarityMatrix {
            size: left.size,
            values,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.size..(index + 1) * self.size]
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.size + column]
    }
}

/// Text similarity index over the restaurant table.
pub struct RestaurantSimilarity {
    pub matrix: SimilarityMatrix,
    pub review_vocabulary_len: usize,
    pub cuisine_vocabulary_len: usize,
}

/// Fits one vectorizer on the reviews and an independent one on the cuisines, and
/// averages the two cosine similarity matrices.
pub fn build_restaurant_similarity(restaurants: &[Restaurant]) -> RestaurantSimilarity {
    let vectorizer = TfidfVectorizer::default();

    let reviews: Vec<&str> = restaurants.iter().map(|r| r.reviews.as_str()).collect();
    let cuisines: Vec<&str> = restaurants.iter().map(|r| r.cuisine.as_str()).collect();

    let review_tfidf = vectorizer.fit_transform(reviews.as_slice());
    let cuisine_tfidf = vectorizer.fit_transform(cuisines.as_slice());

    let review_similarity = SimilarityMatrix::linear_kernel(&review_tfidf);
    let cuisine_similarity = SimilarityMatrix::linear_kernel(&cuisine_tfidf);

    RestaurantSimilarity {
        matrix: SimilarityMatrix::average(&review_similarity, &cuisine_similarity),
        review_vocabulary_len: review_tfidf.vocabulary_len(),
        cuisine_vocabulary_len: cuisine_tfidf.vocabulary_len(),
    }
}
