//! Submit command - registers a team from a JSON form and document files

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use clap::Args;

use crate::domain::{RegistrationDocuments, RegistrationForm, SubmissionOutcome, UploadFile};
use crate::infrastructure::http::create_abort_controller;

#[derive(Args, Clone)]
pub struct SubmitArgs {
    /// Registration form as JSON
    #[arg(long)]
    pub form: PathBuf,

    #[arg(long)]
    pub payment_receipt: PathBuf,

    #[arg(long)]
    pub identity_document: PathBuf,

    #[arg(long)]
    pub membership_document: Option<PathBuf>,
}

pub async fn run(args: SubmitArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_client_state_with_config(&config)?;

    let raw = tokio::fs::read_to_string(&args.form)
        .await
        .with_context(|| format!("Failed to read {}", args.form.display()))?;
    let form: RegistrationForm = serde_json::from_str(&raw).context("Invalid registration form")?;

    let mut documents = RegistrationDocuments::new(
        read_upload(&args.payment_receipt).await?,
        read_upload(&args.identity_document).await?,
    );
    if let Some(path) = &args.membership_document {
        documents = documents.with_membership_document(read_upload(path).await?);
    }

    if state.registration.has_pending_submission() {
        println!("Resuming an earlier submission with its original idempotency key");
    }

    let controller = create_abort_controller(None);
    let signal = controller.signal();
    super::cancel_on_ctrl_c(controller);

    match state.registration.submit(&form, &documents, &signal).await {
        SubmissionOutcome::Success(receipt) => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(())
        }
        SubmissionOutcome::FieldErrors(errors) => {
            for error in &errors {
                eprintln!("{}: {}", error.field, error.message);
            }
            anyhow::bail!("Registration rejected ({} field errors)", errors.len())
        }
        SubmissionOutcome::RetryableFailure(error) => {
            anyhow::bail!("{} Run the command again to retry safely.", error.message)
        }
        SubmissionOutcome::Fatal(error) => anyhow::bail!("{}", error.message),
        SubmissionOutcome::Cancelled => {
            println!("Submission cancelled");
            Ok(())
        }
    }
}

/// Read a file and guess its MIME type from the extension
pub async fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(UploadFile::new(
        file_name(path),
        guess_mime_type(path),
        Bytes::from(content),
    ))
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
