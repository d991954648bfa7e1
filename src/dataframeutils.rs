use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use log::info;
use rayon::prelude::*;

use crate::recommender::context::RecommenderContext;

/// Per-worker handles: the shared read-only context and the serving settings.
#[derive(Clone)]
pub struct SharedHandlesAndConfig {
    pub context: Arc<RecommenderContext>,
    pub catalog_stats: Arc<CatalogStats>,
    pub num_items_to_recommend: usize,
    pub qty_workers: usize,
}

pub struct CatalogStats {
    pub descriptive_name: String,
    pub qty_restaurants: usize,
    pub qty_unique_names: usize,
    pub qty_shadowed_names: usize,
    pub qty_cities: usize,
    pub qty_cuisines: usize,
    pub qty_without_reviews: usize,
    pub qty_ratings: usize,
    pub qty_unique_users: usize,
    pub min_rating: f64,
    pub max_rating: f64,
    pub mean_rating: f64,
    pub review_vocabulary_len: usize,
    pub cuisine_vocabulary_len: usize,
    pub loaded_at: NaiveDateTime,
}

pub fn determine_catalog_statistics(
    descriptive_name: &str,
    context: &RecommenderContext,
) -> CatalogStats {
    let restaurants = context.restaurants();

    let mut cities: Vec<&str> = restaurants.par_iter().map(|r| r.city.as_str()).collect();
    cities.par_sort_unstable();
    cities.dedup();

    let mut cuisines: Vec<&str> = restaurants
        .par_iter()
        .map(|r| r.cuisine.as_str())
        .filter(|cuisine| !cuisine.is_empty())
        .collect();
    cuisines.par_sort_unstable();
    cuisines.dedup();

    let qty_without_reviews = restaurants
        .par_iter()
        .filter(|r| r.reviews.trim().is_empty())
        .count();

    let rating_values: Vec<f64> = context
        .user_to_ratings
        .par_iter()
        .flat_map(|(_user_id, ratings)| ratings.par_iter().map(|rating| rating.rating))
        .collect();
    let (min_rating, max_rating, mean_rating) = if rating_values.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            rating_values.iter().cloned().fold(f64::INFINITY, f64::min),
            rating_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            rating_values.iter().sum::<f64>() / rating_values.len() as f64,
        )
    };

    let stats = CatalogStats {
        descriptive_name: descriptive_name.to_string(),
        qty_restaurants: restaurants.len(),
        qty_unique_names: restaurants.len() - context.qty_shadowed_names(),
        qty_shadowed_names: context.qty_shadowed_names(),
        qty_cities: cities.len(),
        qty_cuisines: cuisines.len(),
        qty_without_reviews,
        qty_ratings: context.qty_ratings(),
        qty_unique_users: context.qty_users(),
        min_rating,
        max_rating,
        mean_rating,
        review_vocabulary_len: context.review_vocabulary_len(),
        cuisine_vocabulary_len: context.cuisine_vocabulary_len(),
        loaded_at: Utc::now().naive_utc(),
    };

    info!("Loaded {}", stats.descriptive_name);
    info!("\tRestaurants: {} ({} unique names)", stats.qty_restaurants, stats.qty_unique_names);
    info!("\tCities: {}, cuisines: {}", stats.qty_cities, stats.qty_cuisines);
    info!("\tRatings: {} by {} users", stats.qty_ratings, stats.qty_unique_users);
    info!(
        "\tVocabulary: {} review terms, {} cuisine terms",
        stats.review_vocabulary_len, stats.cuisine_vocabulary_len
    );

    stats
}

#[cfg(test)]
pub(crate) mod dataframeutils_test {
    use float_cmp::approx_eq;

    use super::*;
    use crate::recommender::context::context_test::{restaurant, small_context};

    pub(crate) fn shared_handles(context: RecommenderContext) -> SharedHandlesAndConfig {
        let catalog_stats = determine_catalog_statistics("unit test", &context);
        SharedHandlesAndConfig {
            context: Arc::new(context),
            catalog_stats: Arc::new(catalog_stats),
            num_items_to_recommend: 10,
            qty_workers: 1,
        }
    }

    #[test]
    fn should_summarise_catalog() {
        let stats = determine_catalog_statistics("small", &small_context());

        assert_eq!(3, stats.qty_restaurants);
        assert_eq!(3, stats.qty_unique_names);
        assert_eq!(3, stats.qty_cities);
        assert_eq!(2, stats.qty_cuisines);
        assert_eq!(2, stats.qty_ratings);
        assert_eq!(1, stats.qty_unique_users);
        assert!(approx_eq!(f64, stats.mean_rating, 4.0, ulps = 2));
        assert!(approx_eq!(f64, stats.min_rating, 3.0, ulps = 2));
        assert!(approx_eq!(f64, stats.max_rating, 5.0, ulps = 2));
    }

    #[test]
    fn should_handle_catalog_without_ratings() {
        let context = RecommenderContext::new(
            vec![
                restaurant(1, "A", "X", "", ""),
                restaurant(2, "A", "X", "", "nice"),
            ],
            Vec::<crate::io::Rating>::new(),
        );
        let stats = determine_catalog_statistics("no ratings", &context);

        assert_eq!(1, stats.qty_unique_names);
        assert_eq!(1, stats.qty_shadowed_names);
        assert_eq!(0, stats.qty_cuisines);
        assert_eq!(1, stats.qty_without_reviews);
        assert_eq!(0.0, stats.mean_rating);
    }
}
