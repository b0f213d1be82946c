use std::borrow::Cow;

use serde::Deserialize;

// ─── Runner Report Types ──────────────────────────────────────────────────────

/// Top-level JSON report exported by the collection runner.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub run: Run,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// One realized request/response exchange from one iteration of one request
/// in the collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Execution {
    pub item: Item,
    /// Absent when the request never completed.
    #[serde(default)]
    pub response: Option<Response>,
    #[serde(default)]
    pub assertions: Vec<ReportedAssertion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub code: u16,
    pub response_time: f64,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub stream: Option<ResponseStream>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Raw response body. The runner serializes it either as plain text or as a
/// Node `Buffer` object (`{"type": "Buffer", "data": [...]}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseStream {
    Text(String),
    Buffer { data: Vec<u8> },
}

/// A runner-recorded expected value attached to an execution. The `assertion`
/// field holds the expected value as text; callers coerce it to the type they
/// need.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportedAssertion {
    pub assertion: String,
}

impl Response {
    /// Case-sensitive header lookup; first match wins.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.key == key)
            .map(|header| header.value.as_str())
    }
}

impl ResponseStream {
    /// Body as text. Buffer bytes are decoded lossily.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ResponseStream::Text(text) => Cow::Borrowed(text),
            ResponseStream::Buffer { data } => String::from_utf8_lossy(data),
        }
    }
}

impl Execution {
    /// Expected value recorded at `index`, if the runner captured one.
    pub fn expected(&self, index: usize) -> Option<&str> {
        self.assertions
            .get(index)
            .map(|entry| entry.assertion.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_REPORT: &str = r#"{
        "run": {
            "executions": [
                {
                    "item": { "name": "Get User" },
                    "response": {
                        "code": 200,
                        "responseTime": 123,
                        "headers": [
                            { "key": "Content-Type", "value": "application/json" },
                            { "key": "Cache-Control", "value": "max-age=43200" }
                        ],
                        "stream": { "type": "Buffer", "data": [123, 34, 105, 100, 34, 58, 49, 125] }
                    },
                    "assertions": [ { "assertion": "200" } ]
                },
                {
                    "item": { "name": "Missing User" },
                    "assertions": []
                }
            ]
        }
    }"#;

    #[test]
    fn parses_camel_case_report() {
        let report: Report = serde_json::from_str(SAMPLE_REPORT).expect("parse report");
        assert_eq!(report.run.executions.len(), 2);

        let first = &report.run.executions[0];
        assert_eq!(first.item.name, "Get User");
        let response = first.response.as_ref().expect("response present");
        assert_eq!(response.code, 200);
        assert_eq!(response.response_time, 123.0);
        assert_eq!(first.expected(0), Some("200"));
    }

    #[test]
    fn buffer_stream_decodes_to_text() {
        let report: Report = serde_json::from_str(SAMPLE_REPORT).expect("parse report");
        let response = report.run.executions[0].response.as_ref().unwrap();
        let body = response.stream.as_ref().unwrap().as_text();
        assert_eq!(body, r#"{"id":1}"#);
    }

    #[test]
    fn string_stream_passes_through() {
        let stream: ResponseStream =
            serde_json::from_str(r#""{\"id\":7}""#).expect("parse stream");
        assert_eq!(stream.as_text(), r#"{"id":7}"#);
    }

    #[test]
    fn missing_response_deserializes_as_none() {
        let report: Report = serde_json::from_str(SAMPLE_REPORT).expect("parse report");
        assert!(report.run.executions[1].response.is_none());
    }

    #[test]
    fn header_lookup_is_case_sensitive() {
        let report: Report = serde_json::from_str(SAMPLE_REPORT).expect("parse report");
        let response = report.run.executions[0].response.as_ref().unwrap();
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("content-type"), None);
    }
}
