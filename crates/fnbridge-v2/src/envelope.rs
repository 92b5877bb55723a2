//! HTTP API (payload format 2.0) envelope types.

use std::collections::{BTreeMap, HashMap};

use fnbridge_core::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};

/// Inbound HTTP API event.
///
/// Unlike v1, the path and query arrive raw (already percent-encoded) and
/// cookies arrive as a separate list instead of a `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub route_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_query_string: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cookies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parameters: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_variables: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_context: HttpApiRequestContext,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiRequestContext {
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub http: HttpDescription,
}

/// The `requestContext.http` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpDescription {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_agent: String,
}

/// Outbound HTTP API response.
///
/// This schema only honors single-valued headers, so repeated header values
/// are joined before they get here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_full_event() {
        let event = json!({
            "version": "2.0",
            "routeKey": "GET /items/{id}",
            "rawPath": "/items/a%2Fb",
            "rawQueryString": "x=1&y=2%20",
            "cookies": ["a=1", "b=2"],
            "headers": {"host": "example.com", "x-forwarded-proto": "https"},
            "queryStringParameters": {"x": "1", "y": "2 "},
            "pathParameters": {"id": "a/b"},
            "requestContext": {
                "requestId": "JKJaXmPLvHcESHA=",
                "stage": "$default",
                "http": {
                    "method": "GET",
                    "path": "/items/a/b",
                    "protocol": "HTTP/1.1",
                    "sourceIp": "203.0.113.9",
                    "userAgent": "agent"
                }
            },
            "isBase64Encoded": false
        });

        let req: HttpApiRequest = serde_json::from_value(event).unwrap();
        assert_eq!(req.route_key, "GET /items/{id}");
        assert_eq!(req.raw_query_string, "x=1&y=2%20");
        assert_eq!(req.cookies, vec!["a=1", "b=2"]);
        assert_eq!(req.request_context.http.method, "GET");
        assert_eq!(req.request_context.http.source_ip, "203.0.113.9");
        assert_eq!(req.path_parameters["id"], "a/b");
        assert!(req.body.is_empty());
    }

    #[test]
    fn null_fields_are_empty() {
        let event = json!({
            "rawPath": "/",
            "cookies": null,
            "headers": null,
            "requestContext": {"http": {"method": "GET"}},
            "body": null
        });
        let req: HttpApiRequest = serde_json::from_value(event).unwrap();
        assert!(req.cookies.is_empty());
        assert!(req.headers.is_empty());
        assert!(req.body.is_empty());
    }

    #[test]
    fn response_wire_names() {
        let mut resp = HttpApiResponse {
            status_code: 404,
            body: "bm9wZQ==".into(),
            is_base64_encoded: true,
            ..HttpApiResponse::default()
        };
        resp.headers.insert("X".into(), "1,2".into());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            json!({
                "statusCode": 404,
                "headers": {"X": "1,2"},
                "body": "bm9wZQ==",
                "isBase64Encoded": true
            })
        );
    }
}
