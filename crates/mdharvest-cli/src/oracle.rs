use crate::config::{OracleKind, OracleSettings};
use crate::error::{CliError, Result};
use mdharvest::engine::oracle::{
    DisambiguationOracle, OracleError, OracleRequest, OracleResponse, OracleRole, PolicyOracle,
    SelectionPolicy,
};
use serde_json::{Map, Value, json};
use tokio::runtime::Handle;
use tracing::{debug, info};

/// Builds the oracle named by `settings`.
///
/// The HTTP oracle captures the current Tokio runtime, so this must run inside one.
pub fn build_oracle(settings: &OracleSettings) -> Result<Box<dyn DisambiguationOracle>> {
    info!(kind = ?settings.kind, "Selecting candidate oracle.");
    Ok(match settings.kind {
        OracleKind::Nearest => Box::new(PolicyOracle::new(SelectionPolicy::Nearest)),
        OracleKind::All => Box::new(PolicyOracle::new(SelectionPolicy::All)),
        OracleKind::Http => Box::new(HttpOracle::new(settings)?),
    })
}

/// Consults an Ollama-compatible `/api/chat` endpoint, one model per role.
///
/// The answer's `message.content` must be a JSON object holding the index list under
/// `softwareIndex` or `waterModelIndex`. Calls block the current thread, so the oracle must
/// be driven from a blocking context (`block_in_place` or `spawn_blocking`).
pub struct HttpOracle {
    client: reqwest::Client,
    handle: Handle,
    url: String,
    software_model: String,
    water_model: String,
}

impl HttpOracle {
    pub fn new(settings: &OracleSettings) -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| {
            CliError::Other(anyhow::anyhow!("HTTP oracle needs a Tokio runtime: {}", e))
        })?;
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            handle,
            url: format!("{}/api/chat", settings.endpoint.trim_end_matches('/')),
            software_model: settings.software_model.clone(),
            water_model: settings.water_model.clone(),
        })
    }

    fn model_for(&self, role: OracleRole) -> &str {
        match role {
            OracleRole::Software => &self.software_model,
            OracleRole::Water => &self.water_model,
        }
    }

    fn chat_body(&self, request: &OracleRequest) -> Value {
        let field = answer_field(request.role);
        let mut properties = Map::new();
        properties.insert(
            field.to_string(),
            json!({ "type": "array", "items": { "type": "integer" } }),
        );
        json!({
            "model": self.model_for(request.role),
            "messages": [{ "role": "user", "content": request.render_prompt() }],
            "format": {
                "type": "object",
                "properties": properties,
                "required": [field],
            },
            "stream": false,
        })
    }

    async fn chat(&self, request: &OracleRequest) -> std::result::Result<OracleResponse, OracleError> {
        debug!(
            role = %request.role,
            subject = %request.subject_id,
            candidates = request.len(),
            "Querying HTTP oracle."
        );
        let reply: Value = self
            .client
            .post(&self.url)
            .json(&self.chat_body(request))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        let content = reply
            .pointer("/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| OracleError::Contract("reply has no 'message.content'".to_string()))?;
        let answer: Value = serde_json::from_str(content)
            .map_err(|e| OracleError::Contract(format!("message content is not JSON: {}", e)))?;
        OracleResponse::from_json(&answer, answer_field(request.role))
    }
}

impl DisambiguationOracle for HttpOracle {
    fn select_relevant(
        &self,
        request: &OracleRequest,
    ) -> std::result::Result<OracleResponse, OracleError> {
        self.handle.block_on(self.chat(request))
    }
}

fn answer_field(role: OracleRole) -> &'static str {
    match role {
        OracleRole::Software => "softwareIndex",
        OracleRole::Water => "waterModelIndex",
    }
}

fn transport_error(e: reqwest::Error) -> OracleError {
    OracleError::Transport(e.to_string())
}
