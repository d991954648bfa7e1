use std::iter;

use crate::recommender::context::RecommenderContext;
use crate::recommender::{Recommendation, RestaurantScore, Sentinel};

/// The `top_n` restaurants most similar to the restaurant called `name`.
///
/// Returns a single not-found sentinel when the name is unknown. The queried restaurant
/// always ranks first (nothing is more similar to it than itself) and is skipped; the
/// remaining rows follow by descending similarity, equal scores in table order.
pub fn recommend(context: &RecommenderContext, name: &str, top_n: usize) -> Vec<Recommendation> {
    let queried_row = match context.row_for_name(name) {
        Some(row) => row,
        None => return vec![Recommendation::Sentinel(Sentinel::RestaurantNotFound)],
    };

    let similarities = context.similarity().row(queried_row);

    // The queried row goes in front so the stable sort keeps it ahead of exact ties.
    let mut scored: Vec<RestaurantScore> = iter::once(queried_row)
        .chain((0..similarities.len()).filter(|row| *row != queried_row))
        .map(|row| RestaurantScore::new(row, similarities[row]))
        .collect();
    scored.sort();

    scored
        .iter()
        .skip(1)
        .take(top_n)
        .map(|scored| {
            let restaurant = &context.restaurants()[scored.row];
            Recommendation::restaurant(&restaurant.name, &restaurant.city)
        })
        .collect()
}

#[cfg(test)]
mod content_test {
    use super::*;
    use crate::recommender::context::context_test::{restaurant, small_context};

    #[test]
    fn should_rank_shared_cuisine_and_words_first() {
        let context = small_context();
        let recommendations = recommend(&context, "A", 2);

        assert_eq!(
            vec![
                Recommendation::restaurant("B", "Y"),
                Recommendation::restaurant("C", "Z"),
            ],
            recommendations
        );
    }

    #[test]
    fn should_return_not_found_sentinel_for_unknown_name() {
        let context = small_context();
        assert_eq!(
            vec![Recommendation::Sentinel(Sentinel::RestaurantNotFound)],
            recommend(&context, "Nowhere", 5)
        );
    }

    #[test]
    fn should_cap_results_at_other_restaurants() {
        let context = small_context();
        let recommendations = recommend(&context, "C", 10);

        assert_eq!(2, recommendations.len());
        assert!(!recommendations.contains(&Recommendation::restaurant("C", "Z")));
        assert!(recommend(&context, "C", 0).is_empty());
    }

    #[test]
    fn should_exclude_queried_restaurant_when_text_is_identical() {
        let context = RecommenderContext::new(
            vec![
                restaurant(1, "Early Twin", "X", "thai", "spicy noodles"),
                restaurant(2, "Unrelated", "X", "french", "butter croissant"),
                restaurant(3, "Late Twin", "X", "thai", "spicy noodles"),
            ],
            Vec::new(),
        );

        let recommendations = recommend(&context, "Late Twin", 2);
        assert_eq!(
            vec![
                Recommendation::restaurant("Early Twin", "X"),
                Recommendation::restaurant("Unrelated", "X"),
            ],
            recommendations
        );
    }

    #[test]
    fn should_break_ties_in_table_order() {
        let context = RecommenderContext::new(
            vec![
                restaurant(1, "Query", "X", "", ""),
                restaurant(2, "First", "X", "", ""),
                restaurant(3, "Second", "X", "", ""),
                restaurant(4, "Third", "X", "", ""),
            ],
            Vec::new(),
        );

        let names: Vec<String> = recommend(&context, "Third", 3)
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(vec!["Query (X)", "First (X)", "Second (X)"], names);
    }

    #[test]
    fn should_be_deterministic() {
        let context = small_context();
        assert_eq!(recommend(&context, "B", 2), recommend(&context, "B", 2));
    }
}
