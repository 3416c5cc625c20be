//! Contact-form lead submission
//!
//! Leads are validated and normalized locally, then handed to a
//! [`LeadStore`]. The production store posts them to the hosted REST
//! backend configured under `leads`.

use async_trait::async_trait;
use folio_config::LeadsConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Maximum length of the name field, in characters
pub const MAX_NAME_CHARS: usize = 100;
/// Maximum length of the message field, in characters
pub const MAX_MESSAGE_CHARS: usize = 5000;
/// Maximum length of an email address
pub const MAX_EMAIL_CHARS: usize = 254;

/// Errors from validating or storing a lead
#[derive(Debug, Error)]
pub enum LeadError {
    /// A field failed validation
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No backend endpoint is configured
    #[error("Lead submission is disabled: no leads.endpoint configured")]
    Disabled,

    /// The request could not be sent or timed out
    #[error("Lead backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Lead backend rejected the submission with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl LeadError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// A contact-form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl LeadSubmission {
    /// Create a submission with the required fields
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            company: None,
            project: None,
        }
    }

    /// Set the optional company
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the optional project type
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Trim every field, lowercase the email and drop blank optional fields
    #[must_use]
    pub fn normalized(self) -> Self {
        let optional = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            message: self.message.trim().to_string(),
            company: optional(self.company),
            project: optional(self.project),
        }
    }

    /// Check required fields, lengths and the email shape
    pub fn validate(&self) -> Result<(), LeadError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LeadError::invalid("name", "is required"));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(LeadError::invalid(
                "name",
                format!("must be at most {MAX_NAME_CHARS} characters"),
            ));
        }

        validate_email(self.email.trim())?;

        let message = self.message.trim();
        if message.is_empty() {
            return Err(LeadError::invalid("message", "is required"));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(LeadError::invalid(
                "message",
                format!("must be at most {MAX_MESSAGE_CHARS} characters"),
            ));
        }

        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), LeadError> {
    let invalid = || LeadError::invalid("email", format!("'{email}' is not a valid address"));

    if email.is_empty() {
        return Err(LeadError::invalid("email", "is required"));
    }
    if email.len() > MAX_EMAIL_CHARS || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

/// Persists validated leads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Store one lead
    async fn store(&self, lead: &LeadSubmission) -> Result<(), LeadError>;
}

/// Stores leads by inserting rows through a hosted REST API
/// (`POST <endpoint>/rest/v1/<table>`).
#[derive(Debug, Clone)]
pub struct RestLeadStore {
    client: reqwest::Client,
    insert_url: String,
    api_key: String,
}

impl RestLeadStore {
    /// Create a store for an endpoint and table
    pub fn new(
        endpoint: &str,
        table: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LeadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            insert_url: format!("{}/rest/v1/{}", endpoint.trim_end_matches('/'), table),
            api_key: api_key.into(),
        })
    }

    /// Create a store from configuration; [`LeadError::Disabled`] when no
    /// endpoint is set
    pub fn from_config(config: &LeadsConfig) -> Result<Self, LeadError> {
        let endpoint = config.endpoint.as_deref().ok_or(LeadError::Disabled)?;
        Self::new(
            endpoint,
            &config.table,
            config.api_key.clone().unwrap_or_default(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// URL rows are posted to
    pub fn insert_url(&self) -> &str {
        &self.insert_url
    }
}

#[async_trait]
impl LeadStore for RestLeadStore {
    async fn store(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        debug!("Posting lead to {}", self.insert_url);

        let response = self
            .client
            .post(&self.insert_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(lead)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Lead backend returned {}: {}", status, body);
        Err(LeadError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Validates, normalizes and stores leads
#[derive(Debug, Clone)]
pub struct LeadService<S> {
    store: S,
}

impl<S: LeadStore> LeadService<S> {
    /// Create a service over a store
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Submit a lead. Returns the normalized submission that was stored.
    pub async fn submit(&self, lead: LeadSubmission) -> Result<LeadSubmission, LeadError> {
        let lead = lead.normalized();
        if let Err(e) = lead.validate() {
            debug!("Rejected lead: {}", e);
            return Err(e);
        }

        self.store.store(&lead).await?;
        info!(
            company = lead.company.as_deref().unwrap_or("-"),
            "Stored lead from {}", lead.email
        );
        Ok(lead)
    }

    /// Access the underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }
}
