//! Send command - email an exported CSV report.
//!
//! Credentials come from the environment only: `SENDGRID_API_KEY` selects
//! the provider API, otherwise `SMTP_PASS` plus the relay settings from the
//! config select the SMTP relay. The CSV stays on disk whatever the
//! delivery outcome.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use preplog_core::MailSettings;
use preplog_mail::{
    transport_from_credentials, Attachment, Credentials, MailMessage, SmtpCredentials,
};

/// Arguments for the send command.
#[derive(Args)]
pub struct SendArgs {
    /// CSV report to attach
    #[arg(required = true)]
    csv: PathBuf,

    /// From address (overrides config)
    #[arg(long)]
    from: Option<String>,

    /// To address (overrides config)
    #[arg(long)]
    to: Option<String>,

    /// Subject line (overrides config)
    #[arg(long)]
    subject: Option<String>,

    /// A short note for the message body
    #[arg(long)]
    note: Option<String>,
}

pub fn run(args: SendArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.csv.exists() {
        anyhow::bail!("CSV file not found: {}", args.csv.display());
    }
    let csv_bytes = fs::read(&args.csv)?;

    let sender = args.from.unwrap_or(config.mail.sender.clone());
    let recipient = args.to.unwrap_or(config.mail.recipient.clone());
    if sender.is_empty() || recipient.is_empty() {
        anyhow::bail!("Both sender and recipient addresses are required (flags or config)");
    }

    let message = MailMessage {
        sender,
        recipient: recipient.clone(),
        subject: args.subject.unwrap_or(config.mail.subject.clone()),
        body: args.note.unwrap_or_else(|| {
            format!(
                "Production log report generated {}.",
                chrono::Local::now().format("%Y-%m-%d")
            )
        }),
        attachment: Attachment::csv(config.mail.attachment_name.clone(), csv_bytes),
    };

    let transport = transport_from_credentials(credentials_from_env(&config.mail, &message.sender))?;
    info!("Sending via {} to {}", transport.name(), recipient);

    match transport.send(&message) {
        Ok(()) => {
            println!(
                "{} Report sent to {} via {}",
                style("✓").green(),
                recipient,
                transport.name()
            );
            Ok(())
        }
        Err(e) => {
            // The report itself is untouched; only delivery failed.
            println!(
                "{} Delivery failed: {} (the CSV remains at {})",
                style("✗").red(),
                e,
                args.csv.display()
            );
            Err(e.into())
        }
    }
}

fn credentials_from_env(settings: &MailSettings, sender: &str) -> Credentials {
    let api_key = std::env::var("SENDGRID_API_KEY").ok().filter(|k| !k.is_empty());

    let smtp = std::env::var("SMTP_PASS")
        .ok()
        .filter(|p| !p.is_empty())
        .map(|password| SmtpCredentials {
            host: settings.smtp_host.clone(),
            port: settings.smtp_port,
            username: if settings.smtp_user.is_empty() {
                sender.to_string()
            } else {
                settings.smtp_user.clone()
            },
            password,
        });

    Credentials { api_key, smtp }
}
