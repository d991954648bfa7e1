use actix_web::HttpResponse;

pub mod index_resource;
pub mod recommend_resource;

const PAGE_HEADER: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>";

pub(crate) fn html_page(title: &str, body: &str) -> HttpResponse {
    let mut html = String::with_capacity(PAGE_HEADER.len() + title.len() + body.len() + 64);
    html.push_str(PAGE_HEADER);
    html.push_str(&escape_html(title));
    html.push_str("</title></head><body>");
    html.push_str(body);
    html.push_str("</body></html>");

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
