use itertools::Itertools;

use crate::io::UserId;
use crate::recommender::context::RecommenderContext;
use crate::recommender::{collaborative, content, Recommendation};

/// Union of the content and collaborative recommendations, deduplicated and cut to `top_n`.
///
/// Both sources are asked for `top_n` entries each. Sentinels from either source are kept
/// as regular entries. The order of the merged list carries no ranking meaning; duplicates
/// keep their first occurrence, content entries before collaborative ones.
pub fn recommend(
    context: &RecommenderContext,
    user_id: UserId,
    name: &str,
    top_n: usize,
) -> Vec<Recommendation> {
    let content_recommendations = content::recommend(context, name, top_n);
    let collaborative_recommendations = collaborative::recommend(context, user_id, top_n);

    content_recommendations
        .into_iter()
        .chain(collaborative_recommendations)
        .unique()
        .take(top_n)
        .collect()
}

#[cfg(test)]
mod hybrid_test {
    use hashbrown::HashSet;

    use super::*;
    use crate::recommender::context::context_test::{rating, restaurant, small_context};
    use crate::recommender::Sentinel;

    #[test]
    fn should_merge_and_deduplicate_both_sources() {
        let context = small_context();
        let merged = recommend(&context, 1, "A", 10);

        assert_eq!(2, merged.len());
        let expected: HashSet<Recommendation> = vec![
            Recommendation::restaurant("B", "Y"),
            Recommendation::restaurant("C", "Z"),
        ]
        .into_iter()
        .collect();
        assert_eq!(expected, merged.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn should_truncate_to_top_n() {
        let restaurants = (0..8)
            .map(|id| restaurant(id, &format!("R{}", id), "X", "bistro", "cosy place"))
            .collect();
        let ratings = (0..8).map(|id| rating(1, id, id as f64)).collect();
        let context = RecommenderContext::new(restaurants, ratings);

        assert_eq!(4, recommend(&context, 1, "R0", 4).len());
    }

    #[test]
    fn should_pass_sentinels_through() {
        let context = small_context();

        let merged = recommend(&context, 77, "Unknown", 10);
        assert_eq!(
            vec![
                Recommendation::Sentinel(Sentinel::RestaurantNotFound),
                Recommendation::Sentinel(Sentinel::NoRatingsForUser),
            ],
            merged
        );

        let merged = recommend(&context, 77, "A", 10);
        assert_eq!(3, merged.len());
        assert!(merged.contains(&Recommendation::Sentinel(Sentinel::NoRatingsForUser)));
    }
}
