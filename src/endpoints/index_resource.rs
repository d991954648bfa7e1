extern crate sys_info;

use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::dataframeutils::SharedHandlesAndConfig;
use crate::endpoints::{escape_html, html_page};
use web::Data;

#[get("/")]
pub async fn landing() -> HttpResponse {
    let mut html = String::new();
    html.push_str("<h1>Restaurant recommendations</h1>");
    html.push_str("<p>Tell us who you are and a restaurant you liked. ");
    html.push_str("We blend restaurants with similar reviews and cuisine with the places you rated highest.</p>");
    html.push_str("<p><a href=\"/index\">Get recommendations</a></p>");
    html_page("Restaurant recommendations", &html)
}

#[get("/index")]
pub async fn index_form() -> HttpResponse {
    let mut html = String::new();
    html.push_str("<h1>Find restaurants</h1>");
    html.push_str("<form action=\"/recommend\" method=\"post\">");
    html.push_str("<label for=\"user_id\">User id</label> ");
    html.push_str("<input type=\"number\" id=\"user_id\" name=\"user_id\" required><br />");
    html.push_str("<label for=\"restaurant_name\">Restaurant name</label> ");
    html.push_str("<input type=\"text\" id=\"restaurant_name\" name=\"restaurant_name\" required><br />");
    html.push_str("<input type=\"submit\" value=\"Recommend\">");
    html.push_str("</form>");
    html_page("Find restaurants", &html)
}

#[get("/internal")]
pub async fn internal(config: Data<SharedHandlesAndConfig>) -> HttpResponse {
    let mut html = "hybrid-reco: restaurant recommendations from review similarity and ratings.<br />".to_string();

    let stats = &config.catalog_stats;
    html.push_str("<h3>Catalog</h3>");
    html.push_str("Loaded: ");
    html.push_str(&escape_html(&stats.descriptive_name));
    html.push_str("<br />Loaded at: ");
    html.push_str(&stats.loaded_at.to_string());
    html.push_str("<br />Age (minutes): ");
    let age_minutes = (Utc::now().naive_utc() - stats.loaded_at).num_minutes();
    html.push_str(&age_minutes.to_string());
    html.push_str("<br />Qty restaurants: ");
    html.push_str(&stats.qty_restaurants.to_string());
    html.push_str("<br />Qty unique names: ");
    html.push_str(&stats.qty_unique_names.to_string());
    html.push_str(" (");
    html.push_str(&stats.qty_shadowed_names.to_string());
    html.push_str(" shadowed by an earlier row)");
    html.push_str("<br />Qty cities: ");
    html.push_str(&stats.qty_cities.to_string());
    html.push_str("<br />Qty cuisines: ");
    html.push_str(&stats.qty_cuisines.to_string());
    html.push_str("<br />Qty without reviews: ");
    html.push_str(&stats.qty_without_reviews.to_string());

    html.push_str("<h3>Ratings</h3>");
    html.push_str("Qty ratings: ");
    html.push_str(&stats.qty_ratings.to_string());
    html.push_str("<br />Qty users: ");
    html.push_str(&stats.qty_unique_users.to_string());
    html.push_str(&format!(
        "<br />Rating min={:.2} mean={:.2} max={:.2}",
        stats.min_rating, stats.mean_rating, stats.max_rating
    ));

    html.push_str("<h3>Models</h3>");
    html.push_str("Review vocabulary: ");
    html.push_str(&stats.review_vocabulary_len.to_string());
    html.push_str(" terms<br />Cuisine vocabulary: ");
    html.push_str(&stats.cuisine_vocabulary_len.to_string());
    html.push_str(" terms<br />Qty items to recommend: ");
    html.push_str(&config.num_items_to_recommend.to_string());
    html.push_str("<br /><a href=\"/index\">recommendation form</a>");

    html.push_str("<h3>Machine instance</h3>");
    html.push_str("Qty CPU's detected: ");
    html.push_str(&sys_info::cpu_num().unwrap_or(0).to_string());
    html.push_str("<br />Qty actix workers set: ");
    html.push_str(&config.qty_workers.to_string());
    html.push_str("<br />CPU speed: ");
    html.push_str(&sys_info::cpu_speed().unwrap_or(0).to_string());
    html.push_str("MHz");
    html.push_str("<h3>Metrics</h3>");
    html.push_str("<a href=\"/internal/prometheus\">prometheus</a>");

    html_page("internal", &html)
}
