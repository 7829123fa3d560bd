use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Page layout handed to the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub page_size: String,
    pub margin_top_mm: u32,
    pub margin_right_mm: u32,
    pub margin_bottom_mm: u32,
    pub margin_left_mm: u32,
}

impl Default for PageOptions {
    /// A4 with 20mm on every side.
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            margin_top_mm: 20,
            margin_right_mm: 20,
            margin_bottom_mm: 20,
            margin_left_mm: 20,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to start converter: {0}")]
    Spawn(std::io::Error),

    #[error("converter I/O failed: {0}")]
    Io(std::io::Error),

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("converter produced no output")]
    Empty,
}

/// HTML to PDF conversion.
#[async_trait]
pub trait HtmlToPdf: Send + Sync {
    async fn convert(&self, html: &str, options: &PageOptions) -> Result<Vec<u8>, ConversionError>;
}

/// Pipes HTML through an external `wkhtmltopdf` binary (stdin to stdout).
#[derive(Debug, Clone)]
pub struct WkhtmltopdfConverter {
    binary: PathBuf,
}

impl WkhtmltopdfConverter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    fn args(options: &PageOptions) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "--page-size".to_string(),
            options.page_size.clone(),
            "--margin-top".to_string(),
            format!("{}mm", options.margin_top_mm),
            "--margin-right".to_string(),
            format!("{}mm", options.margin_right_mm),
            "--margin-bottom".to_string(),
            format!("{}mm", options.margin_bottom_mm),
            "--margin-left".to_string(),
            format!("{}mm", options.margin_left_mm),
            "-".to_string(),
            "-".to_string(),
        ]
    }
}

#[async_trait]
impl HtmlToPdf for WkhtmltopdfConverter {
    async fn convert(&self, html: &str, options: &PageOptions) -> Result<Vec<u8>, ConversionError> {
        let mut child = Command::new(&self.binary)
            .args(Self::args(options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ConversionError::Spawn)?;

        // Feed stdin concurrently so a full stdout pipe cannot stall the child
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConversionError::Io(std::io::Error::other("converter stdin unavailable")))?;
        let input = html.to_owned();
        let writer = tokio::spawn(async move {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await.map_err(ConversionError::Io)?;
        if !output.status.success() {
            return Err(ConversionError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(ConversionError::Io(err)),
            Err(join_err) => return Err(ConversionError::Io(std::io::Error::other(join_err))),
        }

        if output.stdout.is_empty() {
            return Err(ConversionError::Empty);
        }
        debug!(bytes = output.stdout.len(), "converted document");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_carry_page_layout() {
        let args = WkhtmltopdfConverter::args(&PageOptions::default());
        let joined = args.join(" ");
        assert!(joined.contains("--page-size A4"));
        assert!(joined.contains("--margin-left 20mm"));
        assert_eq!(&args[args.len() - 2..], &["-".to_string(), "-".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let converter = WkhtmltopdfConverter::new("/nonexistent/formflow-wkhtmltopdf");
        let result = converter.convert("<p>x</p>", &PageOptions::default()).await;
        assert!(matches!(result, Err(ConversionError::Spawn(_))));
    }
}
