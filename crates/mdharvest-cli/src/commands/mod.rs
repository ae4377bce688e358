pub mod extract;
pub mod serve;

use mdharvest::workflows::extract::ExtractionResult;
use serde_json::{Value, json};

/// The response envelope shared by the `extract` output and the HTTP endpoint.
pub fn success_payload(result: &ExtractionResult, include_water_model_type: bool) -> Value {
    json!({
        "status": "success",
        "data": result.public_records(include_water_model_type),
    })
}
