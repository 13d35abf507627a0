//! AWS Lambda HTTP entry point
//!
//! Accepts a JSON [`ScenarioInput`] in the request body and returns the full
//! JSON [`ScenarioResult`]. Configuration and validation failures map to
//! 400 responses with the error message in the body; the UI layer surfaces
//! them as form messages.

use lambda_http::{run, service_fn, Body, Error, Request, Response};

use lonelyless_engine::{CostBenefitEngine, ScenarioInput};

async fn handle(engine: &CostBenefitEngine, event: Request) -> Result<Response<Body>, Error> {
    let input: ScenarioInput = match serde_json::from_slice(event.body().as_ref()) {
        Ok(input) => input,
        Err(e) => return respond(400, error_body(&format!("invalid scenario input: {}", e))),
    };

    match engine.evaluate(&input) {
        Ok(result) => respond(200, serde_json::to_string(&result)?),
        Err(e) => respond(400, error_body(&e.to_string())),
    }
}

fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn respond(status: u16, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::Text(body))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let engine = CostBenefitEngine::default_lonelyless();
    let engine_ref = &engine;
    run(service_fn(move |event| async move {
        handle(engine_ref, event).await
    }))
    .await
}
