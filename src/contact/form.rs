use crate::{
    contact::relay::ContactTransport,
    contact::request::ContactRequest,
    foundation::error::VitrineResult,
};

/// How long a success or error banner stays up.
pub const STATUS_HOLD_SECS: f64 = 5.0;
const HOLD_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

/// Contact form state. Submission failures end in [`FormStatus::Error`]; they are never
/// returned to the caller and never retried.
#[derive(Clone, Debug)]
pub struct ContactForm {
    draft: ContactRequest,
    status: FormStatus,
    hold_remaining: f64,
    last_error: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            draft: ContactRequest::default(),
            status: FormStatus::Idle,
            hold_remaining: 0.0,
            last_error: None,
        }
    }

    pub fn draft(&self) -> &ContactRequest {
        &self.draft
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.draft.name = value,
            FormField::Email => self.draft.email = value,
            FormField::Phone => self.draft.phone = Some(value),
            FormField::Subject => self.draft.subject = value,
            FormField::Message => self.draft.message = value,
        }
    }

    /// Enter `Submitting` and hand out the request to deliver. `None` while a submission is
    /// already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactRequest> {
        if self.status == FormStatus::Submitting {
            return None;
        }
        self.status = FormStatus::Submitting;
        self.hold_remaining = 0.0;
        self.last_error = None;
        Some(self.draft.clone())
    }

    /// Record the delivery outcome of the in-flight submission.
    pub fn complete(&mut self, outcome: VitrineResult<()>) {
        if self.status != FormStatus::Submitting {
            return;
        }
        match outcome {
            Ok(()) => {
                self.status = FormStatus::Success;
                self.draft = ContactRequest::default();
                tracing::info!("contact form delivered");
            }
            Err(err) => {
                tracing::warn!(error = %err, "contact form delivery failed");
                self.status = FormStatus::Error;
                self.last_error = Some(err.to_string());
            }
        }
        self.hold_remaining = STATUS_HOLD_SECS;
    }

    /// Validate and deliver the draft in one go.
    #[tracing::instrument(skip_all)]
    pub fn submit(&mut self, transport: &mut dyn ContactTransport) -> FormStatus {
        let Some(request) = self.begin_submit() else {
            return self.status;
        };
        let outcome = request
            .validate()
            .and_then(|()| transport.send(&request));
        self.complete(outcome);
        self.status
    }

    /// Count down the success/error banner.
    pub fn advance(&mut self, dt: f64) {
        if !matches!(self.status, FormStatus::Success | FormStatus::Error) {
            return;
        }
        self.hold_remaining -= dt.max(0.0);
        if self.hold_remaining <= HOLD_EPSILON {
            self.hold_remaining = 0.0;
            self.status = FormStatus::Idle;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
