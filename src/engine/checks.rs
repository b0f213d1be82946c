use serde_json::Value;
use thiserror::Error;

use crate::domain::{Execution, Report, Response};

// ─── Report Validation ────────────────────────────────────────────────────────

/// Header key looked up by the content-type check. Matching is
/// case-sensitive against the report's header sequence.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// The only content type the content-type scenario accepts.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body fields compared against the first two recorded expected values, in
/// positional order.
const BODY_FIELDS: [&str; 2] = ["name", "email"];

/// First violated condition of a validation procedure. Messages carry the
/// request label plus expected and actual values.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{request}: execution produced no response")]
    MissingResponse { request: String },
    #[error("{request}: no recorded expected value at index {index}")]
    MissingAssertion { request: String, index: usize },
    #[error("{request}: expected value `{value}` is not an integer")]
    BadExpectedValue { request: String, value: String },
    #[error("{request}: expected status {expected}, got {actual}")]
    StatusMismatch {
        request: String,
        expected: u16,
        actual: u16,
    },
    #[error("{request}: response time too high: {elapsed_ms} ms (budget {budget_ms} ms)")]
    ResponseTimeExceeded {
        request: String,
        elapsed_ms: f64,
        budget_ms: f64,
    },
    #[error("{request}: invalid Content-Type: {}", .actual.as_deref().unwrap_or("missing"))]
    ContentTypeMismatch {
        request: String,
        actual: Option<String>,
    },
    #[error("{request}: response has no body")]
    MissingBody { request: String },
    #[error("{request}: response body is not valid JSON: {source}")]
    BodyNotJson {
        request: String,
        source: serde_json::Error,
    },
    #[error("{request}: expected {field} `{expected}`, got `{actual}`")]
    FieldMismatch {
        request: String,
        field: String,
        expected: String,
        actual: String,
    },
    #[error("{request}: `{field}` not found in response body")]
    FieldMissing { request: String, field: String },
    #[error("{request}: response body is not an array")]
    NotAnArray { request: String },
    #[error("{request}: expected {expected} items, got {actual}")]
    CountMismatch {
        request: String,
        expected: usize,
        actual: usize,
    },
}

/// Every execution's actual status code must equal the integer parsed from
/// its first recorded expected value. Also applied, unchanged, to the
/// negative-path dataset whose expected codes are error conditions.
pub fn check_status_codes(report: &Report) -> Result<(), ValidationError> {
    for execution in &report.run.executions {
        let response = require_response(execution)?;
        let expected: u16 = expected_integer(execution, 0)?;
        if response.code != expected {
            return Err(ValidationError::StatusMismatch {
                request: execution.item.name.clone(),
                expected,
                actual: response.code,
            });
        }
    }
    Ok(())
}

/// Every execution's response time must stay strictly below `budget_ms`.
pub fn check_response_times(report: &Report, budget_ms: f64) -> Result<(), ValidationError> {
    for execution in &report.run.executions {
        let response = require_response(execution)?;
        if response.response_time >= budget_ms {
            return Err(ValidationError::ResponseTimeExceeded {
                request: execution.item.name.clone(),
                elapsed_ms: response.response_time,
                budget_ms,
            });
        }
    }
    Ok(())
}

/// Every execution must carry a `Content-Type` header whose value is exactly
/// `application/json`. An absent header fails with the value reported as
/// missing.
pub fn check_content_type(report: &Report) -> Result<(), ValidationError> {
    for execution in &report.run.executions {
        let response = require_response(execution)?;
        let content_type = response.header(CONTENT_TYPE_HEADER);
        if content_type != Some(JSON_CONTENT_TYPE) {
            return Err(ValidationError::ContentTypeMismatch {
                request: execution.item.name.clone(),
                actual: content_type.map(str::to_string),
            });
        }
    }
    Ok(())
}

/// Every execution's body, parsed as JSON, must carry `name` and `email`
/// fields matching the first two recorded expected values, in that order.
pub fn check_body_fields(report: &Report) -> Result<(), ValidationError> {
    for execution in &report.run.executions {
        let body = parse_body(execution)?;
        for (index, field) in BODY_FIELDS.iter().enumerate() {
            let expected = expected_text(execution, index)?;
            let actual = match body.get(field) {
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
                None => {
                    return Err(ValidationError::FieldMissing {
                        request: execution.item.name.clone(),
                        field: (*field).to_string(),
                    });
                }
            };
            if actual != expected {
                return Err(ValidationError::FieldMismatch {
                    request: execution.item.name.clone(),
                    field: (*field).to_string(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }
    }
    Ok(())
}

/// Every execution's body, parsed as JSON, must contain `field`; its value
/// is irrelevant.
pub fn check_required_field(report: &Report, field: &str) -> Result<(), ValidationError> {
    for execution in &report.run.executions {
        let body = parse_body(execution)?;
        if body.get(field).is_none() {
            return Err(ValidationError::FieldMissing {
                request: execution.item.name.clone(),
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Every execution's body must be a JSON array whose length equals the
/// integer parsed from the first recorded expected value.
pub fn check_pagination(report: &Report) -> Result<(), ValidationError> {
    for execution in &report.run.executions {
        let expected: usize = expected_integer(execution, 0)?;
        let body = parse_body(execution)?;
        let items = body.as_array().ok_or_else(|| ValidationError::NotAnArray {
            request: execution.item.name.clone(),
        })?;
        if items.len() != expected {
            return Err(ValidationError::CountMismatch {
                request: execution.item.name.clone(),
                expected,
                actual: items.len(),
            });
        }
    }
    Ok(())
}

fn require_response(execution: &Execution) -> Result<&Response, ValidationError> {
    execution
        .response
        .as_ref()
        .ok_or_else(|| ValidationError::MissingResponse {
            request: execution.item.name.clone(),
        })
}

fn expected_text(execution: &Execution, index: usize) -> Result<&str, ValidationError> {
    execution
        .expected(index)
        .ok_or_else(|| ValidationError::MissingAssertion {
            request: execution.item.name.clone(),
            index,
        })
}

fn expected_integer<T: std::str::FromStr>(
    execution: &Execution,
    index: usize,
) -> Result<T, ValidationError> {
    let text = expected_text(execution, index)?;
    text.trim()
        .parse()
        .map_err(|_| ValidationError::BadExpectedValue {
            request: execution.item.name.clone(),
            value: text.to_string(),
        })
}

fn parse_body(execution: &Execution) -> Result<Value, ValidationError> {
    let response = require_response(execution)?;
    let stream = response
        .stream
        .as_ref()
        .ok_or_else(|| ValidationError::MissingBody {
            request: execution.item.name.clone(),
        })?;

    serde_json::from_str(&stream.as_text()).map_err(|source| ValidationError::BodyNotJson {
        request: execution.item.name.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Header, Item, ReportedAssertion, ResponseStream, Run};
    use pretty_assertions::assert_eq;

    fn response(code: u16, time_ms: f64) -> Response {
        Response {
            code,
            response_time: time_ms,
            headers: vec![Header {
                key: CONTENT_TYPE_HEADER.to_string(),
                value: JSON_CONTENT_TYPE.to_string(),
            }],
            stream: None,
        }
    }

    fn execution(name: &str, response: Option<Response>, expected: &[&str]) -> Execution {
        Execution {
            item: Item {
                name: name.to_string(),
            },
            response,
            assertions: expected
                .iter()
                .map(|value| ReportedAssertion {
                    assertion: (*value).to_string(),
                })
                .collect(),
        }
    }

    fn report(executions: Vec<Execution>) -> Report {
        Report {
            run: Run { executions },
        }
    }

    fn with_body(mut response: Response, body: &str) -> Response {
        response.stream = Some(ResponseStream::Text(body.to_string()));
        response
    }

    #[test]
    fn status_codes_pass_when_expected_matches() {
        let report = report(vec![
            execution("Get User", Some(response(200, 80.0)), &["200"]),
            execution("Missing User", Some(response(404, 90.0)), &["404"]),
        ]);
        assert!(check_status_codes(&report).is_ok());
    }

    #[test]
    fn status_code_mismatch_names_both_values() {
        let report = report(vec![execution(
            "Get User",
            Some(response(500, 80.0)),
            &["200"],
        )]);
        let err = check_status_codes(&report).unwrap_err();
        assert_eq!(err.to_string(), "Get User: expected status 200, got 500");
    }

    #[test]
    fn status_check_stops_at_first_violation() {
        let report = report(vec![
            execution("First", Some(response(500, 80.0)), &["200"]),
            execution("Second", Some(response(500, 80.0)), &["200"]),
        ]);
        let err = check_status_codes(&report).unwrap_err();
        assert!(err.to_string().starts_with("First:"));
    }

    #[test]
    fn non_integer_expected_value_is_rejected() {
        let report = report(vec![execution(
            "Get User",
            Some(response(200, 80.0)),
            &["OK"],
        )]);
        let err = check_status_codes(&report).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Get User: expected value `OK` is not an integer"
        );
    }

    #[test]
    fn missing_response_fails_every_check() {
        let report = report(vec![execution("Get User", None, &["200"])]);
        assert!(matches!(
            check_status_codes(&report),
            Err(ValidationError::MissingResponse { .. })
        ));
        assert!(matches!(
            check_response_times(&report, 500.0),
            Err(ValidationError::MissingResponse { .. })
        ));
    }

    #[test]
    fn response_times_under_budget_pass() {
        let report = report(vec![
            execution("Get User", Some(response(200, 120.0)), &[]),
            execution("List Posts", Some(response(200, 499.9)), &[]),
        ]);
        assert!(check_response_times(&report, 500.0).is_ok());
    }

    #[test]
    fn response_time_budget_is_strict() {
        // Exactly on the budget is already too slow.
        let report = report(vec![execution("Get User", Some(response(200, 500.0)), &[])]);
        let err = check_response_times(&report, 500.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Get User: response time too high: 500 ms (budget 500 ms)"
        );
    }

    #[test]
    fn content_type_must_match_exactly() {
        let mut wrong = response(200, 80.0);
        wrong.headers[0].value = "text/html".to_string();
        let report = report(vec![execution("Get User", Some(wrong), &[])]);
        let err = check_content_type(&report).unwrap_err();
        assert_eq!(err.to_string(), "Get User: invalid Content-Type: text/html");
    }

    #[test]
    fn absent_content_type_reports_missing() {
        let mut bare = response(200, 80.0);
        bare.headers.clear();
        let report = report(vec![execution("Get User", Some(bare), &[])]);
        let err = check_content_type(&report).unwrap_err();
        assert_eq!(err.to_string(), "Get User: invalid Content-Type: missing");
    }

    #[test]
    fn content_type_lookup_is_case_sensitive() {
        let mut lowercase = response(200, 80.0);
        lowercase.headers[0].key = "content-type".to_string();
        let report = report(vec![execution("Get User", Some(lowercase), &[])]);
        assert!(check_content_type(&report).is_err());
    }

    #[test]
    fn body_fields_match_expected_values_in_order() {
        let body = r#"{"name": "Leanne Graham", "email": "Sincere@april.biz"}"#;
        let report = report(vec![execution(
            "Get User",
            Some(with_body(response(200, 80.0), body)),
            &["Leanne Graham", "Sincere@april.biz"],
        )]);
        assert!(check_body_fields(&report).is_ok());
    }

    #[test]
    fn body_field_mismatch_names_field_and_values() {
        let body = r#"{"name": "Ervin Howell", "email": "Sincere@april.biz"}"#;
        let report = report(vec![execution(
            "Get User",
            Some(with_body(response(200, 80.0), body)),
            &["Leanne Graham", "Sincere@april.biz"],
        )]);
        let err = check_body_fields(&report).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Get User: expected name `Leanne Graham`, got `Ervin Howell`"
        );
    }

    #[test]
    fn body_field_check_reads_buffer_streams() {
        let bytes = br#"{"name": "Leanne Graham", "email": "Sincere@april.biz"}"#.to_vec();
        let mut buffered = response(200, 80.0);
        buffered.stream = Some(ResponseStream::Buffer { data: bytes });
        let report = report(vec![execution(
            "Get User",
            Some(buffered),
            &["Leanne Graham", "Sincere@april.biz"],
        )]);
        assert!(check_body_fields(&report).is_ok());
    }

    #[test]
    fn required_field_accepts_any_value() {
        let report = report(vec![
            execution(
                "Get Post",
                Some(with_body(response(200, 80.0), r#"{"id": 7}"#)),
                &[],
            ),
            execution(
                "Get Todo",
                Some(with_body(response(200, 80.0), r#"{"id": null}"#)),
                &[],
            ),
        ]);
        assert!(check_required_field(&report, "id").is_ok());
    }

    #[test]
    fn required_field_absent_fails() {
        let report = report(vec![execution(
            "Get Post",
            Some(with_body(response(200, 80.0), r#"{"title": "x"}"#)),
            &[],
        )]);
        let err = check_required_field(&report, "id").unwrap_err();
        assert_eq!(err.to_string(), "Get Post: `id` not found in response body");
    }

    #[test]
    fn pagination_matches_array_length() {
        let report = report(vec![execution(
            "List Posts",
            Some(with_body(response(200, 80.0), r#"[{}, {}, {}, {}, {}]"#)),
            &["5"],
        )]);
        assert!(check_pagination(&report).is_ok());
    }

    #[test]
    fn pagination_count_mismatch_names_both_counts() {
        let report = report(vec![execution(
            "List Posts",
            Some(with_body(response(200, 80.0), r#"[{}, {}]"#)),
            &["5"],
        )]);
        let err = check_pagination(&report).unwrap_err();
        assert_eq!(err.to_string(), "List Posts: expected 5 items, got 2");
    }

    #[test]
    fn pagination_rejects_non_array_body() {
        let report = report(vec![execution(
            "List Posts",
            Some(with_body(response(200, 80.0), r#"{"count": 5}"#)),
            &["5"],
        )]);
        assert!(matches!(
            check_pagination(&report),
            Err(ValidationError::NotAnArray { .. })
        ));
    }

    #[test]
    fn missing_body_is_distinguished_from_bad_json() {
        let report_no_body = report(vec![execution(
            "Get User",
            Some(response(200, 80.0)),
            &[],
        )]);
        assert!(matches!(
            check_required_field(&report_no_body, "id"),
            Err(ValidationError::MissingBody { .. })
        ));

        let report_bad_json = report(vec![execution(
            "Get User",
            Some(with_body(response(200, 80.0), "not json")),
            &[],
        )]);
        assert!(matches!(
            check_required_field(&report_bad_json, "id"),
            Err(ValidationError::BodyNotJson { .. })
        ));
    }
}
