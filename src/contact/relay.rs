use crate::{
    contact::request::ContactRequest,
    foundation::error::{VitrineError, VitrineResult},
};

/// Endpoint of the hosted email relay the payload is shaped for.
pub const RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Delivers a contact request somewhere. Failures are reported as `TransportFailure`.
pub trait ContactTransport {
    fn send(&mut self, request: &ContactRequest) -> VitrineResult<()>;
}

/// Account identifiers for the email relay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl RelayConfig {
    pub fn validate(&self) -> VitrineResult<()> {
        if self.service_id.is_empty() || self.template_id.is_empty() || self.public_key.is_empty()
        {
            return Err(VitrineError::validation(
                "relay service_id, template_id and public_key are required",
            ));
        }
        Ok(())
    }

    pub fn payload(&self, request: &ContactRequest) -> RelayPayload {
        RelayPayload {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            user_id: self.public_key.clone(),
            template_params: TemplateParams {
                name: request.name.trim().to_string(),
                email: request.email.trim().to_string(),
                phone: request.phone().unwrap_or_default().to_string(),
                subject: request.subject.trim().to_string(),
                message: request.message.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TemplateParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// JSON body posted to [`RELAY_ENDPOINT`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayPayload {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl RelayPayload {
    pub fn to_json(&self) -> VitrineResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Serializes payloads without sending them; optionally fails every delivery.
#[derive(Clone, Debug)]
pub struct RecordingTransport {
    pub config: RelayConfig,
    pub sent: Vec<String>,
    pub fail_with: Option<String>,
}

impl RecordingTransport {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            sent: Vec::new(),
            fail_with: None,
        }
    }

    pub fn failing(config: RelayConfig, reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::new(config)
        }
    }
}

impl ContactTransport for RecordingTransport {
    fn send(&mut self, request: &ContactRequest) -> VitrineResult<()> {
        if let Some(reason) = &self.fail_with {
            return Err(VitrineError::transport(reason.clone()));
        }
        self.config.validate()?;
        let body = self.config.payload(request).to_json()?;
        self.sent.push(body);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/relay.rs"]
mod tests;
