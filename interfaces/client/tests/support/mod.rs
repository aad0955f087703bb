//! In-process marketplace and provider endpoint for the integration tests
#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::{http::header, web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use bigiot_client::{Consumer, Credentials, MarketConfiguration, Provider};

pub const CONSUMER_ID: &str = "TestOrg-Consumer";
pub const CONSUMER_SECRET: &str = "consumer-secret";
pub const PROVIDER_ID: &str = "TestOrg-Provider";
pub const PROVIDER_SECRET: &str = "provider-secret";
pub const ORGANIZATION_ID: &str = "TestOrg";

pub const PARKING_CATEGORY: &str = "urn:big-iot:ParkingSpaceCategory";
pub const PARKING_OFFERING: &str = "TestOrg-Provider-Parking";

const CONSUMER_TOKEN: &str = "consumer-market-token";
const PROVIDER_TOKEN: &str = "provider-market-token";

#[derive(Default)]
struct MarketState {
    offerings: BTreeMap<String, Value>,
    queries: HashMap<String, String>,
    subscriptions: u64,
}

impl MarketState {
    fn seed(&mut self, base_url: &str) {
        let record = offering_record(&json!({
            "id": PROVIDER_ID,
            "name": "Parking",
            "rdfUri": PARKING_CATEGORY,
            "inputData": [
                {"name": "latitude", "rdfUri": "http://schema.org/latitude"},
                {"name": "longitude", "rdfUri": "http://schema.org/longitude"},
                {"name": "radius", "rdfUri": "http://schema.org/geoRadius"},
            ],
            "outputData": [{"name": "vacant", "rdfUri": "http://schema.org/vacant"}],
            "endpoints": {
                "uri": format!("{}/parking", base_url),
                "endpointType": "HTTP_GET",
                "accessInterfaceType": "EXTERNAL",
            },
            "extent": {"city": "Cologne"},
            "license": "OPEN_DATA_LICENSE",
            "price": {"pricingModel": "FREE"},
            "activation": {"status": true, "expirationTime": 4_102_444_800_000i64},
        }));
        self.offerings.insert(PARKING_OFFERING.to_string(), record);
    }

    fn dispatch(&mut self, operation: &str, variables: &Value) -> Result<Value, String> {
        match operation {
            "addOffering" => {
                let record = offering_record(&variables["newOffering"]);
                let id = record["id"].as_str().unwrap_or_default().to_string();
                self.offerings.insert(id, record.clone());
                Ok(record)
            }
            "deleteOffering" => {
                let id = str_var(&variables["offering"]["id"])?;
                self.offerings
                    .remove(id)
                    .map(|_| json!({ "id": id }))
                    .ok_or_else(|| format!("Offering {} not found", id))
            }
            "activateOffering" => {
                let id = str_var(&variables["offering"]["id"])?;
                let record = self
                    .offerings
                    .get_mut(id)
                    .ok_or_else(|| format!("Offering {} not found", id))?;
                record["activation"] = json!({
                    "status": true,
                    "expirationTime": variables["offering"]["expirationTime"],
                });
                Ok(record.clone())
            }
            "offering" => {
                let id = str_var(&variables["offeringId"])?;
                Ok(self.offerings.get(id).cloned().unwrap_or(Value::Null))
            }
            "addOfferingQuery" => {
                let query = &variables["newOfferingQuery"];
                if query["id"] != json!(CONSUMER_ID) {
                    return Err("unknown consumer".to_string());
                }
                let id = format!("{}-Query{}", CONSUMER_ID, self.queries.len() + 1);
                self.queries
                    .insert(id.clone(), str_var(&query["rdfUri"])?.to_string());
                Ok(json!({ "id": id, "name": query["name"] }))
            }
            "matchingOfferings" => {
                let query_id = str_var(&variables["queryId"])?;
                let category = self
                    .queries
                    .get(query_id)
                    .ok_or_else(|| format!("Query {} not found", query_id))?;
                Ok(Value::Array(
                    self.offerings
                        .values()
                        .filter(|o| o["rdfAnnotation"]["uri"] == json!(category))
                        .cloned()
                        .collect(),
                ))
            }
            "subscribeConsumerToOffering" => {
                let subscription = &variables["subscription"];
                let consumer_id = str_var(&subscription["id"])?;
                let offering_id = str_var(&subscription["offeringId"])?;
                let offering = self
                    .offerings
                    .get(offering_id)
                    .cloned()
                    .ok_or_else(|| format!("Offering {} not found", offering_id))?;
                self.subscriptions += 1;
                let id = format!("{}-Subscription{}", consumer_id, self.subscriptions);
                let token = sign_access_token(json!({
                    "subscriptionId": id,
                    "consumerId": consumer_id,
                    "offeringId": offering_id,
                    "iat": Utc::now().timestamp(),
                    "exp": (Utc::now() + Duration::hours(1)).timestamp(),
                }));
                Ok(json!({ "id": id, "accessToken": token, "offering": offering }))
            }
            other => Err(format!("unknown operation {}", other)),
        }
    }
}

fn str_var(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a string, got {}", value))
}

/// Marketplace view of a registered offering descriptor.
fn offering_record(descriptor: &Value) -> Value {
    let provider_id = descriptor["id"].as_str().unwrap_or_default();
    let name = descriptor["name"].as_str().unwrap_or_default();
    let fields = |key: &str| -> Value {
        descriptor[key]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .map(|f| json!({"name": f["name"], "rdfAnnotation": {"uri": f["rdfUri"]}}))
                    .collect()
            })
            .unwrap_or_default()
    };

    json!({
        "id": format!("{}-{}", provider_id, name.replace(' ', "_")),
        "name": name,
        "provider": {
            "id": provider_id,
            "name": "Provider",
            "organization": {"id": ORGANIZATION_ID, "name": "Test Organization"},
        },
        "activation": descriptor["activation"],
        "rdfAnnotation": {"uri": descriptor["rdfUri"], "label": null, "proposed": false},
        "inputs": fields("inputData"),
        "outputs": fields("outputData"),
        "endpoints": [descriptor["endpoints"]],
        "spatialExtent": descriptor["extent"],
        "license": descriptor["license"],
        "price": descriptor["price"],
    })
}

pub fn sign_access_token(claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(PROVIDER_SECRET.as_bytes()),
    )
    .unwrap()
}

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn access_token(query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let credentials = (
        query.get("clientId").map(String::as_str),
        query.get("clientSecret").map(String::as_str),
    );
    match credentials {
        (Some(CONSUMER_ID), Some(CONSUMER_SECRET)) => {
            HttpResponse::Ok().body(format!("{}\n", CONSUMER_TOKEN))
        }
        (Some(PROVIDER_ID), Some(PROVIDER_SECRET)) => HttpResponse::Ok().body(PROVIDER_TOKEN),
        _ => HttpResponse::Unauthorized().finish(),
    }
}

async fn graphql(
    req: HttpRequest,
    state: web::Data<Mutex<MarketState>>,
    body: web::Json<Value>,
) -> HttpResponse {
    match bearer(&req) {
        Some(CONSUMER_TOKEN) | Some(PROVIDER_TOKEN) => (),
        _ => return HttpResponse::Unauthorized().finish(),
    }

    let operation = body["operationName"].as_str().unwrap_or_default().to_string();
    let result = state.lock().unwrap().dispatch(&operation, &body["variables"]);
    match result {
        Ok(value) => {
            let mut data = Map::new();
            data.insert(operation, value);
            HttpResponse::Ok().json(json!({ "data": data }))
        }
        Err(message) => HttpResponse::Ok().json(json!({
            "data": null,
            "errors": [{ "message": message }],
        })),
    }
}

/// Provider endpoint of the seeded parking offering.
async fn parking(req: HttpRequest, query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let authorized = bearer(&req).map_or(false, |token| {
        jsonwebtoken::decode::<Value>(
            token,
            &DecodingKey::from_secret(PROVIDER_SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .is_ok()
    });
    if !authorized {
        return HttpResponse::Unauthorized().finish();
    }

    let coordinate = |name: &str| -> f64 {
        query
            .get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    };
    HttpResponse::Ok().json(json!([
        {"latitude": coordinate("latitude"), "longitude": coordinate("longitude"), "vacant": true},
        {"latitude": coordinate("latitude") + 0.001, "longitude": coordinate("longitude"), "vacant": false},
    ]))
}

pub struct MockMarket {
    pub url: String,
    handle: ServerHandle,
}

impl MockMarket {
    /// Starts the marketplace on a random local port with the parking
    /// offering already registered.
    pub async fn start() -> MockMarket {
        let state = web::Data::new(Mutex::new(MarketState::default()));
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/accessToken", web::get().to(access_token))
                .route("/graphql", web::post().to(graphql))
                .route("/parking", web::get().to(parking))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("should bind correctly");

        let url = format!("http://{}", server.addrs()[0]);
        state.lock().unwrap().seed(&url);

        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        MockMarket { url, handle }
    }

    pub fn configuration(&self) -> MarketConfiguration {
        MarketConfiguration::new(&self.url).unwrap()
    }

    pub fn consumer(&self) -> Consumer {
        Consumer::new(
            self.configuration(),
            Credentials::new(CONSUMER_ID, CONSUMER_SECRET),
        )
    }

    pub fn provider(&self) -> Provider {
        Provider::new(
            self.configuration(),
            Credentials::new(PROVIDER_ID, PROVIDER_SECRET),
        )
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Configuration pointing at a port nothing listens on.
pub fn unreachable_market() -> MarketConfiguration {
    MarketConfiguration::new("http://127.0.0.1:9").unwrap()
}
