use anyhow::{anyhow, Result};
use awc::http::header;
use futures::future;
use serde_json::Value;

use bigiot_client::model::{OfferingQuery, OfferingRecord};
use bigiot_client::{Consumer, MarketConfiguration};

use crate::report::OfferingReport;

const PROBE_ORIGIN: &str = "http://localhost";

/// HTTP client used for the CORS probe. Endpoints are probed directly, a
/// configured CORS proxy would answer with its own headers.
pub fn probe_client(configuration: &MarketConfiguration) -> awc::Client {
    let mut builder = awc::Client::builder();
    if let Some(timeout) = configuration.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.finish()
}

/// Discovers every offering of `category` and checks them concurrently.
pub async fn check_category(
    consumer: &Consumer,
    probe: &awc::Client,
    category: &str,
) -> Result<Vec<OfferingReport>> {
    let offerings = consumer
        .discover(&OfferingQuery::category(category))
        .await?;
    log::info!("checking {} offering(s) of {}", offerings.len(), category);

    Ok(future::join_all(
        offerings
            .iter()
            .map(|offering| check_offering(consumer, probe, category, offering)),
    )
    .await)
}

async fn check_offering(
    consumer: &Consumer,
    probe: &awc::Client,
    category: &str,
    offering: &OfferingRecord,
) -> OfferingReport {
    let mut report = OfferingReport::new(category, offering);

    report.fetch_error = match consumer.subscribe(&offering.id).await {
        Ok(subscription) => consumer
            .access::<Value, _, &str, &str>(&subscription, vec![])
            .await
            .err()
            .map(|e| e.to_string()),
        Err(e) => Some(e.to_string()),
    };
    if let Some(e) = &report.fetch_error {
        log::warn!("fetching {} failed: {}", offering.id, e);
    }

    report.cors_error = match offering.endpoint() {
        Some(endpoint) => probe_cors(probe, &endpoint.uri).await.err(),
        None => Some("Offering has no endpoint".to_string()),
    };
    if let Some(e) = &report.cors_error {
        log::warn!("CORS check of {} failed: {}", offering.id, e);
    }
    report
}

async fn probe_cors(client: &awc::Client, url: &str) -> std::result::Result<(), String> {
    let response = client
        .get(url)
        .insert_header((header::ORIGIN, PROBE_ORIGIN))
        .send()
        .await
        .map_err(|e| format!("CORS probe failed: {}", e))?;

    let headers = response.headers();
    let value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    check_cors_headers(
        value(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        value(header::ACCESS_CONTROL_ALLOW_METHODS),
    )
    .map_err(|e| e.to_string())
}

/// Browser clients need `*` as allowed origin and, when methods are
/// restricted, both GET and OPTIONS.
pub fn check_cors_headers(allow_origin: Option<&str>, allow_methods: Option<&str>) -> Result<()> {
    match allow_origin {
        None => return Err(anyhow!("Missing Access-Control-Allow-Origin header")),
        Some("*") => (),
        Some(origin) => return Err(anyhow!("Only allowing origin '{}'", origin)),
    }
    if let Some(methods) = allow_methods {
        let allowed = |method: &str| {
            methods
                .split(',')
                .any(|m| m.trim().eq_ignore_ascii_case(method))
        };
        if !allowed("GET") || !allowed("OPTIONS") {
            return Err(anyhow!("Not allowing GET,OPTIONS methods: {}", methods));
        }
    }
    Ok(())
}
