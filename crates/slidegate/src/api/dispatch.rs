//! Per-request lifecycle: parse, build, call, extract, shape

use serde_json::{Value, json};
use tracing::debug;

use super::{ApiError, GatewayResponse};
use crate::prompts;
use crate::provider::{
    ContentGenerator, GenerateContentResponse, extract_inline_base64, extract_text,
};
use crate::requests::{ClientRequest, Endpoint};

/// Run one client request against the provider
///
/// Makes at most one provider call and never retries.
pub async fn dispatch(
    generator: &dyn ContentGenerator,
    endpoint: Endpoint,
    body: &[u8],
) -> Result<GatewayResponse, ApiError> {
    let request = ClientRequest::parse(endpoint, body)
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;

    let prompt = prompts::build(&request);
    debug!(endpoint = %endpoint, model = %prompt.model, "Calling provider");

    let response = generator
        .generate_content(&prompt.model, &prompt.request)
        .await?;

    shape_response(endpoint, &response)
}

/// Turn a provider envelope into the endpoint's response contract
pub fn shape_response(
    endpoint: Endpoint,
    response: &GenerateContentResponse,
) -> Result<GatewayResponse, ApiError> {
    match endpoint {
        Endpoint::Outline => Ok(GatewayResponse::Text(extract_text(response))),
        Endpoint::SingleSlide => {
            let raw = extract_text(response);
            let slide: Value =
                serde_json::from_str(raw.trim()).map_err(|_| ApiError::MalformedModelOutput)?;
            Ok(GatewayResponse::Json(slide))
        }
        Endpoint::SlideImage | Endpoint::ThemedBackground => Ok(GatewayResponse::Json(
            json!({ "data": extract_inline_base64(response) }),
        )),
        Endpoint::EnhanceNotes => Ok(GatewayResponse::Json(
            json!({ "text": extract_text(response).trim() }),
        )),
    }
}
