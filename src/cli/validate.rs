//! Validate-file command - checks a document against the upload policy

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::domain::{validate_file, UploadFile};

use super::submit::{file_name, guess_mime_type};

#[derive(Args, Clone)]
pub struct ValidateFileArgs {
    pub path: PathBuf,

    /// MIME type to validate instead of the one guessed from the extension
    #[arg(long)]
    pub mime_type: Option<String>,
}

pub async fn run(args: ValidateFileArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let metadata = tokio::fs::metadata(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let mime_type = args
        .mime_type
        .clone()
        .unwrap_or_else(|| guess_mime_type(&args.path));
    let file = UploadFile::metadata(file_name(&args.path), mime_type, metadata.len());

    let result = validate_file(&file, &config.upload);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.valid {
        anyhow::bail!("{}", result.error.unwrap_or_default());
    }

    Ok(())
}
