//! Manual end-to-end check: posts one image to a running gateway and prints
//! the OCR result.

use anyhow::{Context, Result, bail};
use clap::Parser;
use ocr_gateway::upload::ImageFormat;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ocr-smoke", about = "Send an image to the OCR gateway")]
struct Args {
    /// Image to upload (PNG or JPEG)
    #[arg(default_value = "invoice.png")]
    image: PathBuf,

    /// OCR endpoint
    #[arg(long, env = "OCR_URL", default_value = "http://localhost:5000/api/ocr")]
    url: String,

    /// Multipart field name
    #[arg(long, default_value = "image")]
    field: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !args.image.exists() {
        bail!("Image file \"{}\" not found.", args.image.display());
    }

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;

    let file_name = args
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let mime = ImageFormat::from_path(&args.image)
        .map(ImageFormat::mime_type)
        .unwrap_or("application/octet-stream");

    let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
    let form = Form::new().part(args.field, part);

    let response = reqwest::Client::new()
        .post(&args.url)
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", args.url))?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("Response body is not JSON")?;

    if status.is_success() {
        println!(
            "OCR Result: {}",
            body.get("ocrResult").and_then(Value::as_str).unwrap_or_default()
        );
    } else {
        eprintln!("Error Response ({}): {}", status, body);
        std::process::exit(1);
    }

    Ok(())
}
