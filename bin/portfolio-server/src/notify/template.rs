//! HTML rendering for notification emails.
//!
//! The template name ends in `.html`, so minijinja's default auto-escape
//! applies to every interpolated value.

use minijinja::{context, Environment};

use super::NotifyError;
use crate::entities::ContactSubmission;

pub const CONTACT_TEMPLATE: &str = "contact_notification.html";

const SUBMITTED_AT_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// Build the template environment used by [`super::Notifier`].
pub fn environment() -> Result<Environment<'static>, NotifyError> {
    let mut env = Environment::new();
    env.add_template(
        CONTACT_TEMPLATE,
        include_str!("templates/contact_notification.html"),
    )?;
    Ok(env)
}

pub fn contact_subject(submission: &ContactSubmission) -> String {
    format!(
        "New Contact Form: {} - {}",
        submission.service, submission.name
    )
}

pub fn render_contact(
    env: &Environment<'_>,
    submission: &ContactSubmission,
) -> Result<String, NotifyError> {
    let template = env.get_template(CONTACT_TEMPLATE)?;
    let html = template.render(context! {
        name => &submission.name,
        email => &submission.email,
        phone => submission.phone.as_deref().unwrap_or("Not provided"),
        service => &submission.service,
        message => &submission.message,
        submitted_at => submission.timestamp.format(SUBMITTED_AT_FORMAT).to_string(),
    })?;
    Ok(html)
}
