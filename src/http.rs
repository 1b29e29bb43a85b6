//! HTTP transport boundary and response decoding.
//!
//! The client never talks to `reqwest` directly; it builds an
//! [`HttpRequest`] and hands it to a [`Transport`]. [`ReqwestTransport`] is
//! the default implementation.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use strum::{AsRefStr, Display};

use crate::error::{AsanaError, Result};

/// Statuses treated as success.
pub const SUCCESS_STATUSES: [u16; 5] = [200, 201, 203, 204, 206];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
}

/// One named part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    pub field: String,
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartFile),
}

/// Fully-resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        SUCCESS_STATUSES.contains(&self.status)
    }
}

/// Sends a request and returns status plus body.
///
/// Only transport-level failures are errors here; non-success statuses are
/// returned as responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let boundary = format!("asana-client-{}", uuid::Uuid::new_v4().simple());
                builder
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(build_multipart(&boundary, &file))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Encode a single file part as a `multipart/form-data` body.
pub fn build_multipart(boundary: &str, file: &MultipartFile) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.content.len() + 256);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            file.field,
            quoted_filename(&file.filename)
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(&file.content);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

/// Filename as it may appear inside the quoted disposition parameter.
fn quoted_filename(filename: &str) -> String {
    filename
        .replace('"', "\\\"")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Decode a response body as JSON, falling back to the raw text when it
/// does not decode or decodes to nothing.
pub fn decode_body(body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(value) if !is_falsy(&value) => value,
        _ => Value::String(body.to_string()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(number) => number.as_f64() == Some(0.0),
    }
}

/// Turn a response into its decoded body, or the mapped error.
pub fn into_result(response: HttpResponse) -> Result<Value> {
    let decoded = decode_body(&response.body);
    if response.is_success() {
        Ok(decoded)
    } else {
        Err(AsanaError::from_status(
            response.status,
            decoded,
            &response.body,
        ))
    }
}

/// Content type for an uploaded file, from its extension.
pub fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_statuses_are_exact() {
        for status in SUCCESS_STATUSES {
            assert!(HttpResponse::new(status, "").is_success());
        }
        for status in [202, 205, 301, 400, 500] {
            assert!(!HttpResponse::new(status, "").is_success());
        }
    }

    #[test]
    fn decode_body_falls_back_to_raw_text() {
        assert_eq!(decode_body(r#"{"data":[]}"#), json!({"data": []}));
        assert_eq!(decode_body("Bad Request"), json!("Bad Request"));
        assert_eq!(decode_body("{}"), json!("{}"));
        assert_eq!(decode_body("null"), json!("null"));
        assert_eq!(decode_body(""), json!(""));
    }

    #[test]
    fn into_result_maps_failures() {
        let err = into_result(HttpResponse::new(400, "nope")).unwrap_err();
        assert!(matches!(err, AsanaError::FailedAction(ref body) if body == "nope"));

        let err = into_result(HttpResponse::new(422, r#"{"errors":[1]}"#)).unwrap_err();
        assert!(matches!(err, AsanaError::Validation(ref v) if v == &json!({"errors": [1]})));

        let ok = into_result(HttpResponse::new(201, r#"{"data":{}}"#)).unwrap();
        assert_eq!(ok, json!({"data": {}}));
    }

    #[test]
    fn multipart_body_has_one_file_part() {
        let file = MultipartFile {
            field: "file".into(),
            filename: "notes.txt".into(),
            content_type: "text/plain".into(),
            content: b"hello".to_vec(),
        };

        let body = String::from_utf8(build_multipart("b0", &file)).unwrap();

        assert_eq!(
            body,
            "--b0\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             hello\r\n\
             --b0--\r\n"
        );
    }

    #[test]
    fn multipart_filename_cannot_break_out_of_its_header() {
        let file = MultipartFile {
            field: "file".into(),
            filename: "a\"b\r\nContent-Type: text/html\r\n\r\nx.txt".into(),
            content_type: "text/plain".into(),
            content: Vec::new(),
        };

        let body = String::from_utf8(build_multipart("b0", &file)).unwrap();
        let headers: Vec<&str> = body.split("\r\n").collect();

        assert_eq!(
            headers[1],
            "Content-Disposition: form-data; name=\"file\"; \
             filename=\"a\\\"b%0D%0AContent-Type: text/html%0D%0A%0D%0Ax.txt\""
        );
        assert_eq!(headers[2], "Content-Type: text/plain");
    }

    #[test]
    fn content_type_guess_uses_extension() {
        assert_eq!(guess_content_type("logo.PNG"), "image/png");
        assert_eq!(guess_content_type("report.pdf"), "application/pdf");
        assert_eq!(guess_content_type("README"), "application/octet-stream");
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Put.as_ref(), "PUT");
    }
}
