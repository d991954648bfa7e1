use hashbrown::HashSet;

use crate::io::{Rating, RestaurantId, UserId};
use crate::recommender::context::RecommenderContext;
use crate::recommender::{Recommendation, Sentinel};

/// Restaurants among the `top_n` highest ratings of `user_id`.
///
/// The selected ids are joined against the restaurant table, so the result follows table
/// order rather than rating order. Ids without a restaurant row are dropped.
pub fn recommend(context: &RecommenderContext, user_id: UserId, top_n: usize) -> Vec<Recommendation> {
    let user_ratings = context.ratings_for_user(user_id);
    if user_ratings.is_empty() {
        return vec![Recommendation::Sentinel(Sentinel::NoRatingsForUser)];
    }

    let top_rated = top_rated_restaurants(user_ratings, top_n);

    context
        .restaurants()
        .iter()
        .filter(|restaurant| top_rated.contains(&restaurant.id))
        .map(|restaurant| Recommendation::restaurant(&restaurant.name, &restaurant.city))
        .collect()
}

fn top_rated_restaurants(user_ratings: &[Rating], top_n: usize) -> HashSet<RestaurantId> {
    let mut by_rating: Vec<&Rating> = user_ratings.iter().collect();
    // stable: equal ratings keep file order, NaN ratings go last
    by_rating.sort_by(|a, b| {
        a.rating
            .is_nan()
            .cmp(&b.rating.is_nan())
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
    by_rating
        .into_iter()
        .take(top_n)
        .map(|rating| rating.restaurant_id)
        .collect()
}
