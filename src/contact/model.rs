use chrono::{DateTime, SecondsFormat, Utc};

use crate::foundation::error::{FolioError, FolioResult};

/// What the contact form posts to the relay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    /// RFC 3339, UTC.
    #[serde(with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            timestamp,
        }
    }

    pub fn validate(&self) -> FolioResult<()> {
        if self.name.trim().is_empty() {
            return Err(FolioError::validation("name is required"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(FolioError::validation(format!(
                    "'{email}' is not an email address"
                )));
            }
        }
        if self.message.trim().is_empty() {
            return Err(FolioError::validation("message is required"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> FolioResult<String> {
        serde_json::to_string(self).map_err(|e| FolioError::serde(e.to_string()))
    }
}

/// `Z`-suffixed RFC 3339, the shape browsers send from `toISOString()`.
mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(*at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// `at` in the submission's wire format.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
#[path = "../../tests/unit/contact/model.rs"]
mod tests;
