use actix_web::{get, post, web, HttpResponse};
use log::debug;
use serde::Deserialize;

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::endpoints::{escape_html, html_page};
use crate::io::UserId;
use crate::recommender::{hybrid, Recommendation};

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    user_id: UserId,
    restaurant_name: String,
}

#[derive(Debug, Deserialize)]
pub struct V1QueryParams {
    user_id: UserId,
    restaurant_name: String,
    top_n: Option<usize>,
}

// Form endpoint behind the `/index` page. A `user_id` that does not parse as an integer is
// rejected by the extractor with 400 before any recommendation is computed.
#[post("/recommend")]
pub async fn recommend(
    data: web::Data<SharedHandlesAndConfig>,
    form: web::Form<RecommendForm>,
) -> HttpResponse {
    let recommendations = hybrid::recommend(
        data.context.as_ref(),
        form.user_id,
        &form.restaurant_name,
        data.num_items_to_recommend,
    );
    debug!(
        "user {} / {:?}: {} recommendations",
        form.user_id,
        form.restaurant_name,
        recommendations.len()
    );

    html_page("Recommendations", &render_recommendations(&form.restaurant_name, &recommendations))
}

#[get("/v1/recommend")]
pub async fn v1_recommend(
    data: web::Data<SharedHandlesAndConfig>,
    query: web::Query<V1QueryParams>,
) -> HttpResponse {
    let how_many = query.top_n.unwrap_or(data.num_items_to_recommend);
    let recommendations = hybrid::recommend(
        data.context.as_ref(),
        query.user_id,
        &query.restaurant_name,
        how_many,
    );

    HttpResponse::Ok().json(recommendations)
}

fn render_recommendations(restaurant_name: &str, recommendations: &[Recommendation]) -> String {
    let mut html = String::new();
    html.push_str("<h1>Recommended for fans of ");
    html.push_str(&escape_html(restaurant_name));
    html.push_str("</h1>");
    if recommendations.is_empty() {
        html.push_str("<p>No recommendations.</p>");
    } else {
        html.push_str("<ul>");
        for recommendation in recommendations {
            html.push_str("<li>");
            html.push_str(&escape_html(&recommendation.to_string()));
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }
    html.push_str("<p><a href=\"/index\">Try another</a></p>");
    html
}

#[cfg(test)]
mod recommend_resource_test {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde::Deserialize;

    use super::*;
    use crate::dataframeutils::dataframeutils_test::shared_handles;
    use crate::recommender::context::context_test::small_context;

    #[actix_rt::test]
    async fn should_render_hybrid_recommendations() {
        let mut app = test::init_service(
            App::new()
                .data(shared_handles(small_context()))
                .service(recommend),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_form(&[("user_id", "1"), ("restaurant_name", "A")])
            .to_request();
        let resp = test::call_service(&mut app, req).await;

        assert_eq!(StatusCode::OK, resp.status());
        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<li>B (Y)</li>"));
        assert!(html.contains("<li>C (Z)</li>"));
    }

    #[actix_rt::test]
    async fn should_render_sentinels_for_unknown_input() {
        let mut app = test::init_service(
            App::new()
                .data(shared_handles(small_context()))
                .service(recommend),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_form(&[("user_id", "404"), ("restaurant_name", "<Nowhere>")])
            .to_request();
        let resp = test::call_service(&mut app, req).await;

        assert_eq!(StatusCode::OK, resp.status());
        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<li>Restaurant not found</li>"));
        assert!(html.contains("<li>No ratings found for this user</li>"));
        assert!(html.contains("&lt;Nowhere&gt;"));
    }

    #[actix_rt::test]
    async fn should_reject_non_numeric_user_id() {
        let mut app = test::init_service(
            App::new()
                .data(shared_handles(small_context()))
                .service(recommend),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_form(&[("user_id", "abc"), ("restaurant_name", "A")])
            .to_request();
        let resp = test::call_service(&mut app, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, resp.status());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(untagged)]
    enum Entry {
        Restaurant { name: String, city: String },
        Sentinel(String),
    }

    #[actix_rt::test]
    async fn should_return_json_recommendations() {
        let mut app = test::init_service(
            App::new()
                .data(shared_handles(small_context()))
                .service(v1_recommend),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/v1/recommend?user_id=5&restaurant_name=A&top_n=1")
            .to_request();
        let resp = test::call_service(&mut app, req).await;

        assert_eq!(StatusCode::OK, resp.status());
        let entries: Vec<Entry> = test::read_body_json(resp).await;
        assert_eq!(
            vec![Entry::Restaurant {
                name: "B".to_string(),
                city: "Y".to_string()
            }],
            entries
        );
    }

    #[actix_rt::test]
    async fn should_serialize_sentinels_as_strings() {
        let mut app = test::init_service(
            App::new()
                .data(shared_handles(small_context()))
                .service(v1_recommend),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/v1/recommend?user_id=5&restaurant_name=Unknown")
            .to_request();
        let resp = test::call_service(&mut app, req).await;

        let entries: Vec<Entry> = test::read_body_json(resp).await;
        assert_eq!(
            vec![
                Entry::Sentinel("Restaurant not found".to_string()),
                Entry::Sentinel("No ratings found for this user".to_string()),
            ],
            entries
        );
    }
}
