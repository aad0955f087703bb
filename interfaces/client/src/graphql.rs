//! Bearer-authenticated GraphQL executor
use awc::http::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::web::{WebAuth, WebClient};
use crate::{Error, Result};

/// Named GraphQL document together with the top-level field holding its result.
#[derive(Clone, Copy, Debug)]
pub struct Operation {
    pub name: &'static str,
    pub field: &'static str,
    pub document: &'static str,
}

#[derive(Serialize)]
struct Request<'a> {
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    query: &'a str,
    variables: &'a Value,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ResponseError>>,
}

#[derive(Deserialize)]
struct ResponseError {
    message: String,
}

pub struct GraphQlClient {
    client: WebClient,
    url: String,
}

impl GraphQlClient {
    pub fn new(url: String, token: String, timeout: Option<std::time::Duration>) -> Self {
        let client = WebClient::builder()
            .auth(WebAuth::Bearer(token))
            .timeout(timeout)
            .build();
        GraphQlClient { client, url }
    }

    /// Runs `operation` and decodes the value of its result field.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<T> {
        let request = Request {
            operation_name: operation.name,
            query: operation.document,
            variables: &variables,
        };
        log::debug!("GraphQL {} with {}", operation.name, variables);

        let response: Response = self
            .client
            .post(&self.url)
            .send_json(&request)
            .json()
            .await
            .map_err(|e| match e {
                Error::HttpStatusCode { code, msg, .. } => status_error(operation, code, &msg),
                e => e,
            })?;

        decode(operation, response)
    }
}

fn decode<T: DeserializeOwned>(operation: &Operation, response: Response) -> Result<T> {
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        return Err(Error::GraphQlError {
            operation: operation.name,
            message: join_messages(errors),
        });
    }

    let value = response
        .data
        .and_then(|mut data| data.get_mut(operation.field).map(Value::take))
        .ok_or_else(|| Error::GraphQlError {
            operation: operation.name,
            message: format!("response has no `{}` field", operation.field),
        })?;
    Ok(serde_json::from_value(value)?)
}

/// Failed HTTP status: prefer the `errors` the server put in the body over
/// the bare status line.
fn status_error(operation: &Operation, code: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<Response>(body)
        .ok()
        .and_then(|response| response.errors)
        .filter(|errors| !errors.is_empty())
        .map(join_messages)
        .unwrap_or_else(|| code.to_string());
    Error::GraphQlError {
        operation: operation.name,
        message,
    }
}

fn join_messages(errors: Vec<ResponseError>) -> String {
    errors
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LOOKUP: Operation = Operation {
        name: "offering",
        field: "offering",
        document: "query offering($offeringId: String!) { offering(id: $offeringId) { id } }",
    };

    fn response(value: Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_result_field() {
        let id: Option<Value> =
            decode(&LOOKUP, response(json!({"data": {"offering": {"id": "a"}}}))).unwrap();

        assert_eq!(id, Some(json!({"id": "a"})));
    }

    #[test]
    fn null_result_decodes_as_none() {
        let id: Option<Value> = decode(&LOOKUP, response(json!({"data": {"offering": null}}))).unwrap();

        assert_eq!(id, None);
    }

    #[test]
    fn errors_are_joined() {
        let result: Result<Option<Value>> = decode(
            &LOOKUP,
            response(json!({
                "data": null,
                "errors": [{"message": "Unauthorized"}, {"message": "try again"}]
            })),
        );

        match result {
            Err(Error::GraphQlError { operation, message }) => {
                assert_eq!(operation, "offering");
                assert_eq!(message, "Unauthorized; try again");
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn missing_field_is_an_error() {
        let result: Result<Option<Value>> = decode(&LOOKUP, response(json!({"data": {}})));

        assert!(matches!(result, Err(Error::GraphQlError { .. })));
    }

    fn status_message(code: StatusCode, body: &str) -> String {
        match status_error(&LOOKUP, code, body) {
            Error::GraphQlError { operation, message } => {
                assert_eq!(operation, "offering");
                message
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn failed_status_keeps_body_errors() {
        let body = json!({
            "errors": [
                {"message": "Variable \"$offeringId\" of required type \"String!\" was not provided."},
                {"message": "Unknown field"}
            ]
        })
        .to_string();

        assert_eq!(
            status_message(StatusCode::BAD_REQUEST, &body),
            "Variable \"$offeringId\" of required type \"String!\" was not provided.; Unknown field"
        );
    }

    #[test]
    fn failed_status_without_errors_uses_status_line() {
        assert_eq!(
            status_message(StatusCode::UNAUTHORIZED, ""),
            "401 Unauthorized"
        );
        assert_eq!(
            status_message(StatusCode::BAD_GATEWAY, "<html>proxy error</html>"),
            "502 Bad Gateway"
        );
        assert_eq!(
            status_message(StatusCode::BAD_REQUEST, r#"{"errors": []}"#),
            "400 Bad Request"
        );
    }
}
