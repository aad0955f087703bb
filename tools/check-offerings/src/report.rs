use bigiot_client::model::{DataFieldRecord, OfferingRecord};

pub const CSV_HEADER: &str = "category,offering_id,provider_id,organization_id,active,endpoint,license,inputs,outputs,fetch_error,cors_error";

const REPORT_STYLE: &str = r#"
tr { padding: 10px; }
thead td { padding-bottom: 5px; padding-left: 2px; padding-right: 10px; font-size: 18px; }
tbody td { padding: 3px; font-size: 14px; }
"#;

/// Outcome of checking one offering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OfferingReport {
    pub category: String,
    pub offering_id: String,
    pub provider_id: String,
    pub organization_id: String,
    pub active: bool,
    pub endpoint: String,
    pub license: String,
    pub inputs: String,
    pub outputs: String,
    pub fetch_error: Option<String>,
    pub cors_error: Option<String>,
}

impl OfferingReport {
    pub fn new(category: &str, offering: &OfferingRecord) -> Self {
        OfferingReport {
            category: category.to_string(),
            offering_id: offering.id.clone(),
            provider_id: offering.provider_id().unwrap_or_default().to_string(),
            organization_id: offering.organization_id().unwrap_or_default().to_string(),
            active: offering.is_active(),
            endpoint: offering
                .endpoint()
                .map(|e| e.uri.clone())
                .unwrap_or_default(),
            license: offering.license.clone().unwrap_or_default(),
            inputs: rdf_types(&offering.inputs),
            outputs: rdf_types(&offering.outputs),
            fetch_error: None,
            cors_error: None,
        }
    }

    /// Offering ids are `<organization>-<provider>-<offering>`.
    pub fn offering_name(&self) -> &str {
        self.offering_id
            .rsplit('-')
            .next()
            .unwrap_or(&self.offering_id)
    }
}

fn rdf_types(fields: &[DataFieldRecord]) -> String {
    fields
        .iter()
        .map(|f| format!("{}={}", f.name, f.rdf_annotation.uri))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn render_csv(reports: &[OfferingReport]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for r in reports {
        let row: [&str; 11] = [
            r.category.as_str(),
            &r.offering_id,
            &r.provider_id,
            &r.organization_id,
            if r.active { "true" } else { "false" },
            &r.endpoint,
            &r.license,
            &r.inputs,
            &r.outputs,
            r.fetch_error.as_deref().unwrap_or_default(),
            r.cors_error.as_deref().unwrap_or_default(),
        ];
        out.push_str(
            &row.iter()
                .map(|v| escape_csv(v))
                .collect::<Vec<_>>()
                .join(","),
        );
        out.push('\n');
    }
    out
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// ✓ on success, otherwise ❌ with the error as tooltip.
fn status_cell(error: &Option<String>) -> String {
    match error {
        Some(e) => format!("<span title=\"{}\">❌</span>", escape_html(e)),
        None => "<span>✓</span>".to_string(),
    }
}

pub fn render_html(reports: &[OfferingReport]) -> String {
    let mut rows = String::new();
    for r in reports {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&r.provider_id),
            escape_html(r.offering_name()),
            status_cell(&r.fetch_error),
            status_cell(&r.cors_error),
        ));
    }

    format!(
        concat!(
            "<html>\n<head>\n",
            "<meta content=\"text/html;charset=utf-8\" http-equiv=\"Content-Type\">\n",
            "<style>{}</style>\n</head>\n<body>\n<table>\n",
            "<thead><tr><td>Provider</td><td>Offering</td><td>Data</td><td>CORS</td></tr></thead>\n",
            "<tbody>\n{}</tbody>\n</table>\n</body>\n</html>\n"
        ),
        REPORT_STYLE, rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report() -> OfferingReport {
        let record: OfferingRecord = serde_json::from_value(json!({
            "id": "Org-Provider-Parking",
            "provider": {"id": "Org-Provider", "organization": {"id": "Org"}},
            "activation": {"status": true, "expirationTime": 0},
            "inputs": [
                {"name": "latitude", "rdfAnnotation": {"uri": "http://schema.org/latitude"}},
                {"name": "longitude", "rdfAnnotation": {"uri": "http://schema.org/longitude"}}
            ],
            "endpoints": [{
                "uri": "https://example.net/parking",
                "endpointType": "HTTP_GET",
                "accessInterfaceType": "EXTERNAL"
            }],
            "license": "OPEN_DATA_LICENSE"
        }))
        .unwrap();
        OfferingReport::new("urn:big-iot:ParkingSpaceCategory", &record)
    }

    #[test]
    fn report_from_record() {
        let r = report();

        assert_eq!(r.provider_id, "Org-Provider");
        assert_eq!(r.organization_id, "Org");
        assert_eq!(r.offering_name(), "Parking");
        assert_eq!(
            r.inputs,
            "latitude=http://schema.org/latitude;longitude=http://schema.org/longitude"
        );
        assert_eq!(r.outputs, "");
        assert!(r.active);
    }

    #[test]
    fn csv_quotes_separators() {
        let mut r = report();
        r.fetch_error = Some("Provider failed with 500: Internal, \"oops\"".to_string());

        let csv = render_csv(&[r]);
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(
                "urn:big-iot:ParkingSpaceCategory,Org-Provider-Parking,Org-Provider,Org,true,\
                 https://example.net/parking,OPEN_DATA_LICENSE,\
                 latitude=http://schema.org/latitude;longitude=http://schema.org/longitude,,\
                 \"Provider failed with 500: Internal, \"\"oops\"\"\","
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn html_escapes_errors() {
        let mut r = report();
        r.cors_error = Some("Only allowing origin '<http://a&b>'".to_string());

        let html = render_html(&[r]);

        assert!(html.contains("<td>Org-Provider</td><td>Parking</td><td><span>✓</span></td>"));
        assert!(html.contains(
            "<span title=\"Only allowing origin &#x27;&lt;http://a&amp;b&gt;&#x27;\">❌</span>"
        ));
        assert!(html.contains("<td>Provider</td><td>Offering</td><td>Data</td><td>CORS</td>"));
    }
}
