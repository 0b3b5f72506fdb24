use std::time::Duration;

use url::Url;
use wordscore_logging::{score_debug, score_info};

use crate::wire::{parse_status_body, parse_submit_body};
use crate::{FailureKind, RequestError, StatusReport, SubmitReply};

pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub submit_path: String,
    pub status_path: String,
    pub csrf_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            submit_path: "/word_score/".to_string(),
            status_path: "/task-status/".to_string(),
            csrf_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The two backend calls a submit-and-poll session needs.
#[async_trait::async_trait]
pub trait JobClient: Send + Sync {
    async fn submit(&self, page_url: &str, word: &str) -> Result<SubmitReply, RequestError>;

    async fn status(&self, task_id: &str) -> Result<StatusReport, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobClient {
    settings: ClientSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestJobClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::new(
                FailureKind::InvalidUrl,
                "base url cannot carry a path",
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    /// `<base><submit_path>`, keeping any path prefix on the base URL.
    pub fn submit_url(&self) -> Result<Url, RequestError> {
        self.endpoint(&self.settings.submit_path, None)
    }

    /// `<base><status_path><task_id>/`, with the id encoded as one path segment.
    pub fn status_url(&self, task_id: &str) -> Result<Url, RequestError> {
        self.endpoint(&self.settings.status_path, Some(task_id))
    }

    /// Appends the segments of `path` (and `task_id`) to the base URL's path.
    /// A trailing slash is kept when `path` has one, and always follows a task id.
    fn endpoint(&self, path: &str, task_id: Option<&str>) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RequestError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
            if let Some(task_id) = task_id {
                segments.push(task_id);
            }
            if task_id.is_some() || path.ends_with('/') {
                segments.push("");
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl JobClient for ReqwestJobClient {
    async fn submit(&self, page_url: &str, word: &str) -> Result<SubmitReply, RequestError> {
        let url = self.submit_url()?;
        score_info!("POST {} word_len={}", url, word.len());

        let mut request = self
            .client
            .post(url)
            .form(&[("page_url", page_url), ("word", word)]);
        if let Some(token) = self.settings.csrf_token.as_deref() {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let body = read_success_body(response).await?;
        Ok(parse_submit_body(&body))
    }

    async fn status(&self, task_id: &str) -> Result<StatusReport, RequestError> {
        let url = self.status_url(task_id)?;
        score_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_success_body(response).await?;
        Ok(parse_status_body(&body))
    }
}

/// Returns the body of a 2xx response. Any other status becomes an error whose
/// message is the body text, or the status line when the body is empty.
async fn read_success_body(response: reqwest::Response) -> Result<String, RequestError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    if status.is_success() {
        return Ok(body);
    }
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        body
    };
    Err(RequestError::new(
        FailureKind::HttpStatus(status.as_u16()),
        message,
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, status_path: &str) -> ReqwestJobClient {
        ReqwestJobClient::new(ClientSettings {
            base_url: base_url.to_string(),
            status_path: status_path.to_string(),
            ..ClientSettings::default()
        })
        .expect("client")
    }

    #[test]
    fn status_url_appends_id_and_trailing_slash() {
        let client = client("http://localhost:8000", "/task-status/");
        assert_eq!(
            client.status_url("abc").unwrap().as_str(),
            "http://localhost:8000/task-status/abc/"
        );
    }

    #[test]
    fn status_url_encodes_id_as_single_segment() {
        let client = client("http://localhost:8000", "/task-status");
        assert_eq!(
            client.status_url("a/b c").unwrap().as_str(),
            "http://localhost:8000/task-status/a%2Fb%20c/"
        );
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        for base in ["http://host/scorer", "http://host/scorer/"] {
            let client = client(base, "/task-status/");
            assert_eq!(
                client.submit_url().unwrap().as_str(),
                "http://host/scorer/word_score/"
            );
            assert_eq!(
                client.status_url("t1").unwrap().as_str(),
                "http://host/scorer/task-status/t1/"
            );
        }
    }

    #[test]
    fn submit_url_without_trailing_slash_stays_that_way() {
        let client = ReqwestJobClient::new(ClientSettings {
            base_url: "http://localhost:8000".to_string(),
            submit_path: "api/score".to_string(),
            ..ClientSettings::default()
        })
        .expect("client");
        assert_eq!(
            client.submit_url().unwrap().as_str(),
            "http://localhost:8000/api/score"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestJobClient::new(ClientSettings {
            base_url: "not a url".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let err = ReqwestJobClient::new(ClientSettings {
            base_url: "mailto:scores@example.com".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
