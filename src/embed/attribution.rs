use crate::domain::SourceData;
use crate::domain::source_data::{IP_ADDRESS, TIMESTAMP, URL, USER_AGENT, WEBSITE};
use crate::embed::referrer::referer_host;
use actix_web::http::header::{self, HeaderMap};
use chrono::{DateTime, SecondsFormat, Utc};

/// The `Referer` header, or its correctly spelled `Referrer` variant.
pub fn referer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::REFERER)
        .or_else(|| headers.get("referrer"))
        .and_then(|value| value.to_str().ok())
}

pub fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
}

/// Provenance of a request. Inputs that are absent leave their key out.
pub fn extract(headers: &HeaderMap, remote_address: Option<&str>, now: DateTime<Utc>) -> SourceData {
    let mut source_data = SourceData::new();

    if let Some(referer) = referer(headers) {
        if let Some(host) = referer_host(referer) {
            source_data.insert(WEBSITE, host);
        }
        source_data.insert(URL, referer);
    }

    if let Some(user_agent) = user_agent(headers) {
        source_data.insert(USER_AGENT, user_agent);
    }

    if let Some(remote_address) = remote_address {
        source_data.insert(IP_ADDRESS, remote_address);
    }

    source_data.insert(TIMESTAMP, now.to_rfc3339_opts(SecondsFormat::Micros, true));

    source_data
}
