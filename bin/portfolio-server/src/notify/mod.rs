//! Contact-form notification emails.
//!
//! [`Notifier::dispatch`] hands the whole job (render + send) to a detached
//! tokio task. Its outcome is only ever logged: the HTTP response that
//! triggered it has usually been written before the email leaves.

pub mod resend;
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;
use minijinja::Environment;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

use crate::config::Config;
use crate::entities::ContactSubmission;
use self::resend::ResendMailer;

/// Errors raised while preparing or sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// A single outgoing HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Transport for [`EmailMessage`]s.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Attempt one delivery. No retries.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Composes and dispatches the notification for each contact submission.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    templates: Arc<Environment<'static>>,
    sender: String,
    recipient: String,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            mailer,
            templates: Arc::new(template::environment()?),
            sender: sender.into(),
            recipient: recipient.into(),
        })
    }

    /// Build the Resend-backed notifier, or `None` when the API key or the
    /// recipient address is not configured.
    pub fn from_config(cfg: &Config) -> Result<Option<Self>, NotifyError> {
        let (Some(api_key), Some(recipient)) = (&cfg.resend_api_key, &cfg.notification_email)
        else {
            return Ok(None);
        };
        let mailer = ResendMailer::new(cfg.resend_api_url.clone(), api_key.clone());
        Self::new(Arc::new(mailer), cfg.sender_email.clone(), recipient.clone()).map(Some)
    }

    /// Render the notification email for `submission`.
    pub fn compose(&self, submission: &ContactSubmission) -> Result<EmailMessage, NotifyError> {
        Ok(EmailMessage {
            from: self.sender.clone(),
            to: vec![self.recipient.clone()],
            subject: template::contact_subject(submission),
            html: template::render_contact(&self.templates, submission)?,
        })
    }

    /// Compose and send in the background. Failures are logged, never returned.
    ///
    /// The task inherits the caller's span so its log lines keep the
    /// request's trace id.
    pub fn dispatch(&self, submission: ContactSubmission) -> JoinHandle<()> {
        let notifier = self.clone();
        let job = async move {
            let result = match notifier.compose(&submission) {
                Ok(message) => notifier.mailer.send(&message).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => info!(submission_id = %submission.id, "email notification sent"),
                Err(e) => error!(
                    submission_id = %submission.id,
                    error = %e,
                    "failed to send email notification"
                ),
            }
        };
        tokio::spawn(job.in_current_span())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
