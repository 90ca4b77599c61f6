use crate::foundation::error::{VitrineError, VitrineResult};

/// What the visitor typed into the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> VitrineResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(VitrineError::validation(format!(
                    "contact {field} is required"
                )));
            }
        }
        if !plausible_email(self.email.trim()) {
            return Err(VitrineError::validation(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        Ok(())
    }

    /// Phone number, treating a blank entry as absent.
    pub fn phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

fn plausible_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
#[path = "../../tests/unit/contact/request.rs"]
mod tests;
