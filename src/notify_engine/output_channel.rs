use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

// Delimiter for heredoc-style multi-line values; a value containing it would
// corrupt every key written after it.
const MULTILINE_DELIMITER: &str = "EMAIL_BODY_EOF";

#[async_trait]
pub trait OutputChannel {
    type Error: std::error::Error + Sync + Send + 'static;

    async fn write_value(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
    async fn write_multiline(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum OutputChannelError {
    #[error("GITHUB_OUTPUT is not set")]
    OutputFileUnset(#[from] std::env::VarError),
    #[error("Unable to write the output file")]
    WriteFail(#[from] std::io::Error),
    #[error("Value contains the multiline delimiter")]
    DelimiterCollision,
}

pub struct GithubOutputChannel {
    path: PathBuf,
}

impl GithubOutputChannel {
    pub fn from_env() -> Result<Self, OutputChannelError> {
        let path = std::env::var("GITHUB_OUTPUT")?;
        Ok(Self::new(path))
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, text: &str) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl OutputChannel for GithubOutputChannel {
    type Error = OutputChannelError;

    #[tracing::instrument(level = "debug", skip(self, value))]
    async fn write_value(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.append(&format!("{}={}\n", key, value)).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self, value))]
    async fn write_multiline(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        if value.contains(MULTILINE_DELIMITER) {
            return Err(OutputChannelError::DelimiterCollision);
        }
        self.append(&format!(
            "{}<<{}\n{}\n{}\n",
            key, MULTILINE_DELIMITER, value, MULTILINE_DELIMITER
        ))
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{GithubOutputChannel, OutputChannel, OutputChannelError};

    #[tokio::test]
    async fn test_writes_append_to_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        let mut channel = GithubOutputChannel::new(&path);

        channel.write_value("has_matches", "true").await.unwrap();
        channel
            .write_value("email_subject", "Music for 21 March: Japan")
            .await
            .unwrap();
        channel
            .write_multiline("email_body", "<h1>Music for 21 March</h1>\n<p>Japan</p>")
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "has_matches=true\n\
             email_subject=Music for 21 March: Japan\n\
             email_body<<EMAIL_BODY_EOF\n\
             <h1>Music for 21 March</h1>\n<p>Japan</p>\n\
             EMAIL_BODY_EOF\n"
        );
    }

    #[tokio::test]
    async fn test_multiline_value_containing_delimiter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        let mut channel = GithubOutputChannel::new(&path);

        let err = channel
            .write_multiline("email_body", "sneaky EMAIL_BODY_EOF marker")
            .await
            .unwrap_err();

        assert!(matches!(err, OutputChannelError::DelimiterCollision));
        assert!(!path.exists());
    }
}
