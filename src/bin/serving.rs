extern crate hybrid_reco;

use actix_web::{http::ContentEncoding, middleware, App, HttpServer};
use actix_web_prom::PrometheusMetrics;
use log::info;

use std::sync::Arc;

use hybrid_reco::config::AppConfig;
use hybrid_reco::dataframeutils::{determine_catalog_statistics, SharedHandlesAndConfig};
use hybrid_reco::endpoints::index_resource::{index_form, internal, landing};
use hybrid_reco::endpoints::recommend_resource::{recommend, v1_recommend};
use hybrid_reco::recommender::context::RecommenderContext;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(config_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log.level))
        .init();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let num_items_to_recommend = config.model.num_items_to_recommend;
    let qty_workers = config.server.num_workers;

    // Everything is built before binding: a load failure must not leave a half-ready server.
    let context = Arc::new(RecommenderContext::from_files(
        &config.data.restaurants_path,
        &config.data.ratings_path,
    )?);
    let catalog_stats = Arc::new(determine_catalog_statistics(
        &format!("{} + {}", config.data.restaurants_path, config.data.ratings_path),
        &context,
    ));

    info!("start metrics");
    let prometheus = PrometheusMetrics::new("api", Some("/internal/prometheus"), None);

    info!("Done. start httpd at http://{}", &bind_address);
    HttpServer::new(move || {
        let handles_and_config = SharedHandlesAndConfig {
            context: context.clone(),
            catalog_stats: catalog_stats.clone(),
            num_items_to_recommend,
            qty_workers,
        };

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::new(ContentEncoding::Identity))
            .wrap(prometheus.clone())
            .wrap(
                middleware::DefaultHeaders::new()
                    .header("Cache-Control", "no-cache, no-store, must-revalidate")
                    .header("Pragma", "no-cache")
                    .header("Expires", "0"),
            )
            .data(handles_and_config)
            .service(landing)
            .service(index_form)
            .service(recommend)
            .service(v1_recommend)
            .service(internal)
    })
    .workers(qty_workers)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
