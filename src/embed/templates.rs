const API_URL_PLACEHOLDER: &str = "__MAGAZINE_API_URL__";

const IFRAME_PAGE: &str = include_str!("../../templates/embed/iframe.html");
const WIDGET_SCRIPT: &str = include_str!("../../templates/embed/magazine-embed.js");
const DENIED_WIDGET_SCRIPT: &str = include_str!("../../templates/embed/magazine-embed-denied.js");
const FALLBACK_SCRIPT: &str = include_str!("../../templates/embed/magazine-embed-fallback.js");

pub const ACCESS_DENIED_PAGE: &str = include_str!("../../templates/embed/access-denied.html");

pub fn iframe_page(api_url: &str) -> String {
    IFRAME_PAGE.replace(API_URL_PLACEHOLDER, &js_string_literal(api_url))
}

pub fn widget_script(api_url: &str) -> String {
    WIDGET_SCRIPT.replace(API_URL_PLACEHOLDER, &js_string_literal(api_url))
}

pub fn denied_widget_script() -> &'static str {
    DENIED_WIDGET_SCRIPT
}

pub fn fallback_script() -> &'static str {
    FALLBACK_SCRIPT
}

/// A quoted string that is safe inside a `<script>` element.
fn js_string_literal(s: &str) -> String {
    serde_json::Value::from(s).to_string().replace("</", "<\\/")
}
