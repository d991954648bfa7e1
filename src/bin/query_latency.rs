use indicatif::ProgressBar;
use itertools::Itertools;

use hybrid_reco::config::AppConfig;
use hybrid_reco::recommender::context::RecommenderContext;
use hybrid_reco::recommender::{collaborative, content, hybrid};
use hybrid_reco::stopwatch::Stopwatch;

// Replays one query per restaurant name against the configured catalog and reports
// latency percentiles for each recommender.
fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log.level))
        .init();

    let context = RecommenderContext::from_files(
        &config.data.restaurants_path,
        &config.data.ratings_path,
    )?;

    let names = context
        .restaurants()
        .iter()
        .map(|restaurant| restaurant.name.as_str())
        .unique()
        .collect_vec();
    let user_ids = context.user_ids().copied().sorted().collect_vec();

    let mut content_stopwatch = Stopwatch::new();
    let mut collaborative_stopwatch = Stopwatch::new();
    let mut hybrid_stopwatch = Stopwatch::new();

    let progress = ProgressBar::new(names.len() as u64);
    for (position, name) in names.iter().enumerate() {
        progress.inc(1);
        // users without ratings exercise the sentinel path
        let user_id = if user_ids.is_empty() {
            0
        } else {
            user_ids[position % user_ids.len()]
        };

        content_stopwatch.start();
        content::recommend(&context, name, config.model.content_top_n);
        content_stopwatch.stop();

        collaborative_stopwatch.start();
        collaborative::recommend(&context, user_id, config.model.collaborative_top_n);
        collaborative_stopwatch.stop();

        hybrid_stopwatch.start();
        hybrid::recommend(&context, user_id, name, config.model.num_items_to_recommend);
        hybrid_stopwatch.stop();
    }
    progress.finish();

    println!("===============================================================");
    println!("===                    QUERY LATENCY                       ====");
    println!("===============================================================");
    println!("Qty restaurants: {}", context.restaurants().len());
    println!("Qty queries per recommender: {}", content_stopwatch.get_n());
    for (label, stopwatch) in [
        ("content", &content_stopwatch),
        ("collaborative", &collaborative_stopwatch),
        ("hybrid", &hybrid_stopwatch),
    ] {
        println!(
            "{}: p50={:.1} p90={:.1} p95={:.1} p99.5={:.1} (microseconds)",
            label,
            stopwatch.get_percentile_in_micros(0.5),
            stopwatch.get_percentile_in_micros(0.9),
            stopwatch.get_percentile_in_micros(0.95),
            stopwatch.get_percentile_in_micros(0.995),
        );
    }
    Ok(())
}
