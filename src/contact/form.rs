use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};

use crate::{
    contact::model::ContactSubmission,
    foundation::error::{FolioError, FolioResult},
};

pub const SENT_TEXT: &str = "Message sent. I'll get back to you soon.";
pub const FAILED_TEXT: &str = "Your message could not be sent. Please try again.";

/// Delivers a submission somewhere, usually the relay endpoint.
pub trait ContactTransport {
    fn send(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = FolioResult<()>> + Send;
}

/// Posts submissions as JSON to the relay.
#[derive(Clone, Debug)]
pub struct HttpContactTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> FolioResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FolioError::transport(format!("http client init failed: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ContactTransport for HttpContactTransport {
    async fn send(&self, submission: &ContactSubmission) -> FolioResult<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| FolioError::transport(format!("post {}: {e}", self.endpoint)))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FolioError::transport(format!(
                "relay answered {status} for {}",
                self.endpoint
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Sent,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast shown under the form after a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

/// Contact form state: field values, submit lifecycle and the last notification.
#[derive(Clone, Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    state: FormState,
    notification: Option<Notification>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            state: FormState::Editing,
            notification: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Edit a field. Ignored while a submission is in flight.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
        self.state = FormState::Editing;
    }

    /// Freeze the current values into a submission and enter `Submitting`.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> FolioResult<ContactSubmission> {
        if self.is_submitting() {
            return Err(FolioError::validation("a submission is already in flight"));
        }
        let submission = ContactSubmission::new(
            self.name.trim(),
            self.email.trim(),
            self.message.trim(),
            now,
        );
        submission.validate()?;
        self.state = FormState::Submitting;
        self.notification = None;
        Ok(submission)
    }

    /// Settle the in-flight submission. On failure the fields stay for a retry.
    pub fn finish(&mut self, result: &FolioResult<()>) {
        if !self.is_submitting() {
            tracing::debug!("finish without a submission in flight");
            return;
        }
        match result {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.state = FormState::Sent;
                self.notification = Some(Notification {
                    kind: NotificationKind::Success,
                    text: SENT_TEXT.to_string(),
                });
            }
            Err(err) => {
                tracing::warn!(%err, "contact submission failed");
                self.state = FormState::Failed;
                self.notification = Some(Notification {
                    kind: NotificationKind::Error,
                    text: FAILED_TEXT.to_string(),
                });
            }
        }
    }

    /// Submit through `transport` and settle the form with the outcome.
    pub async fn submit<T: ContactTransport>(
        &mut self,
        transport: &T,
        now: DateTime<Utc>,
    ) -> FolioResult<()> {
        let submission = self.begin_submit(now)?;
        let result = transport.send(&submission).await;
        self.finish(&result);
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
