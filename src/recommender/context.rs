use std::time::Instant;

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{info, warn};

use crate::error::Result;
use crate::io::{self, Rating, Restaurant, RestaurantId, UserId};
use crate::similarity::{build_restaurant_similarity, SimilarityMatrix};

/// Read-only state shared by all recommenders: the loaded tables, the name index and the
/// restaurant similarity matrix.
///
/// Built once at startup and never mutated, so it can be shared across worker threads
/// behind an `Arc` without synchronisation.
pub struct RecommenderContext {
    pub(crate) restaurants: Vec<Restaurant>,
    pub(crate) name_to_row: HashMap<String, usize>,
    pub(crate) user_to_ratings: HashMap<UserId, Vec<Rating>>,
    pub(crate) similarity: SimilarityMatrix,
    pub(crate) qty_ratings: usize,
    pub(crate) qty_shadowed_names: usize,
    pub(crate) review_vocabulary_len: usize,
    pub(crate) cuisine_vocabulary_len: usize,
}

impl RecommenderContext {
    pub fn from_files(restaurants_path: &str, ratings_path: &str) -> Result<Self> {
        let start_time = Instant::now();
        let restaurants = io::read_restaurants(restaurants_path)?;
        let ratings = io::read_ratings(ratings_path)?;
        info!(
            "read {} restaurants from {} and {} ratings from {}: {} micros",
            restaurants.len(),
            restaurants_path,
            ratings.len(),
            ratings_path,
            start_time.elapsed().as_micros()
        );
        Ok(RecommenderContext::new(restaurants, ratings))
    }

    pub fn new(restaurants: Vec<Restaurant>, ratings: Vec<Rating>) -> Self {
        if restaurants.is_empty() {
            warn!("restaurant table is empty, every content lookup will miss");
        }

        // First occurrence wins: later restaurants with the same name are unreachable by name.
        let mut name_to_row = HashMap::with_capacity(restaurants.len());
        for (row, restaurant) in restaurants.iter().enumerate() {
            name_to_row.entry(restaurant.name.clone()).or_insert(row);
        }
        let qty_shadowed_names = restaurants.len() - name_to_row.len();
        if qty_shadowed_names > 0 {
            warn!(
                "{} restaurants share a name with an earlier row and cannot be looked up by name",
                qty_shadowed_names
            );
        }

        let known_ids: HashSet<RestaurantId> = restaurants.iter().map(|r| r.id).collect();
        let qty_dangling_ratings = ratings
            .iter()
            .filter(|rating| !known_ids.contains(&rating.restaurant_id))
            .count();
        if qty_dangling_ratings > 0 {
            warn!(
                "{} ratings reference unknown restaurants and will be ignored",
                qty_dangling_ratings
            );
        }

        let qty_ratings = ratings.len();
        // Grouping keeps each user's ratings in file order, which the stable sort relies on.
        let user_to_ratings: HashMap<UserId, Vec<Rating>> = ratings
            .into_iter()
            .map(|rating| (rating.user_id, rating))
            .into_group_map()
            .into_iter()
            .collect();

        let start_time = Instant::now();
        let similarity = build_restaurant_similarity(&restaurants);
        info!(
            "built {}x{} similarity matrix (review terms: {}, cuisine terms: {}): {} micros",
            similarity.matrix.size(),
            similarity.matrix.size(),
            similarity.review_vocabulary_len,
            similarity.cuisine_vocabulary_len,
            start_time.elapsed().as_micros()
        );

        RecommenderContext {
            restaurants,
            name_to_row,
            user_to_ratings,
            similarity: similarity.matrix,
            qty_ratings,
            qty_shadowed_names,
            review_vocabulary_len: similarity.review_vocabulary_len,
            cuisine_vocabulary_len: similarity.cuisine_vocabulary_len,
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn row_for_name(&self, name: &str) -> Option<usize> {
        self.name_to_row.get(name).copied()
    }

    pub fn ratings_for_user(&self, user_id: UserId) -> &[Rating] {
        self.user_to_ratings
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn qty_ratings(&self) -> usize {
        self.qty_ratings
    }

    pub fn qty_users(&self) -> usize {
        self.user_to_ratings.len()
    }

    pub fn user_ids(&self) -> impl Iterator<Item = &UserId> {
        self.user_to_ratings.keys()
    }

    pub fn qty_shadowed_names(&self) -> usize {
        self.qty_shadowed_names
    }

    pub fn review_vocabulary_len(&self) -> usize {
        self.review_vocabulary_len
    }

    pub fn cuisine_vocabulary_len(&self) -> usize {
        self.cuisine_vocabulary_len
    }
}
