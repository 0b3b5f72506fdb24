use thiserror::Error;
use url::Url;

/// One word-search submission: the page to start crawling from and the word to count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub page_url: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a page URL.")]
    MissingUrl,
    #[error("Please enter a word.")]
    MissingWord,
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
}

impl JobRequest {
    pub fn new(page_url: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into().trim().to_string(),
            word: word.into().trim().to_string(),
        }
    }

    /// Checks both fields are filled and the URL is absolute http(s).
    pub fn validate(&self) -> Result<(), FormError> {
        if self.page_url.is_empty() {
            return Err(FormError::MissingUrl);
        }
        if self.word.is_empty() {
            return Err(FormError::MissingWord);
        }
        let parsed =
            Url::parse(&self.page_url).map_err(|err| FormError::InvalidUrl(err.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(FormError::InvalidUrl(format!(
                "unsupported scheme `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let request = JobRequest::new("  https://example.com ", " rust\n");
        assert_eq!(request.page_url, "https://example.com");
        assert_eq!(request.word, "rust");
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            JobRequest::new("", "rust").validate(),
            Err(FormError::MissingUrl)
        );
        assert_eq!(
            JobRequest::new("https://example.com", "   ").validate(),
            Err(FormError::MissingWord)
        );
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(matches!(
            JobRequest::new("mailto:me@example.com", "rust").validate(),
            Err(FormError::InvalidUrl(_))
        ));
        assert!(matches!(
            JobRequest::new("example.com", "rust").validate(),
            Err(FormError::InvalidUrl(_))
        ));
    }
}
