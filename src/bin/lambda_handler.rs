//! AWS Lambda handler for the projection calculators
//!
//! Accepts a calculation request (a JSON object tagged by `mode`) and returns
//! the stamped report. Direct invocations carry the request as the payload;
//! Lambda Function URL events carry it as a string `body` and get an HTTP-shaped
//! response back.

use advisory_projections::{calculate, CalculationReport, CalculationRequest, EngineError};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde_json::{json, Value};

/// Pull the request out of either a direct payload or a Function URL event
fn extract_request(payload: Value) -> Result<(Value, bool), EngineError> {
    match payload.get("body") {
        Some(Value::String(body)) => {
            let request = if body.trim().is_empty() {
                json!({})
            } else {
                serde_json::from_str(body)?
            };
            Ok((request, true))
        }
        _ => Ok((payload, false)),
    }
}

fn http_response(status: u16, body: &Value) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body.to_string(),
    })
}

fn is_preflight(payload: &Value) -> bool {
    payload
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .map(|method| method.eq_ignore_ascii_case("OPTIONS"))
        .unwrap_or(false)
}

/// Run one request; errors become a 400 payload rather than a failed invocation
fn respond(payload: Value) -> Value {
    if is_preflight(&payload) {
        return http_response(200, &Value::Null);
    }

    let (request, over_http) = match extract_request(payload) {
        Ok(parts) => parts,
        Err(e) => return http_response(400, &json!({ "error": e.to_string() })),
    };

    let outcome = CalculationRequest::from_value(request)
        .and_then(|request| calculate(&request.into_assumptions()))
        .map(CalculationReport::new);

    let (status, body) = match outcome {
        Ok(report) => {
            info!("Calculated {}", report.calculator.name());
            match serde_json::to_value(&report) {
                Ok(body) => (200, body),
                Err(e) => (500, json!({ "error": e.to_string() })),
            }
        }
        Err(e) => {
            warn!("Rejected request: {}", e);
            (400, json!({ "error": e.to_string() }))
        }
    };

    if over_http {
        http_response(status, &body)
    } else {
        body
    }
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(respond(event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
