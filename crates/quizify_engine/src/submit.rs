use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use quizify_logging::{quiz_debug, quiz_info};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, McqRequest, McqResponse, SubmitError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/generate-mcqs/";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: McqRequest) -> Result<McqResponse, SubmitError>;
}

/// Reply body shape. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct McqPayload {
    #[serde(default)]
    mcqs: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    client: reqwest::Client,
    endpoint: Url,
    max_response_bytes: u64,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| SubmitError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SubmitError::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    fn build_form(request: McqRequest) -> Result<Form, SubmitError> {
        let McqRequest {
            file_name,
            pdf,
            num_mcqs,
        } = request;
        let pdf_part = Part::bytes(pdf)
            .file_name(file_name)
            .mime_str(PDF_MIME)
            .map_err(|err| SubmitError::new(FailureKind::InvalidRequest, err.to_string()))?;
        Ok(Form::new()
            .part("pdf", pdf_part)
            .text("num_mcqs", num_mcqs.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<BytesMut, SubmitError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                return Err(too_large(self.max_response_bytes, content_len));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_response_bytes {
                return Err(too_large(self.max_response_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, request: McqRequest) -> Result<McqResponse, SubmitError> {
        quiz_info!(
            "POST {} file={:?} pdf_bytes={} num_mcqs={}",
            self.endpoint,
            request.file_name,
            request.pdf.len(),
            request.num_mcqs
        );
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        quiz_debug!("Response status={} content_type={:?}", status, content_type);

        if !status.is_success() {
            // The body only contributes an optional detail; failing to read it keeps the status.
            let detail = match self.read_body(response).await {
                Ok(body) if is_json(content_type.as_deref()) => {
                    serde_json::from_slice::<McqPayload>(&body)
                        .ok()
                        .and_then(|payload| payload.error)
                        .filter(|message| !message.trim().is_empty())
                }
                _ => None,
            };
            return Err(SubmitError::new(
                FailureKind::HttpStatus {
                    status: status.as_u16(),
                    detail,
                },
                status.to_string(),
            ));
        }

        if !is_json(content_type.as_deref()) {
            return Err(SubmitError::new(
                FailureKind::UnexpectedContentType { content_type },
                "response is not json",
            ));
        }

        let body = self.read_body(response).await?;
        let payload: McqPayload = serde_json::from_slice(&body)
            .map_err(|err| SubmitError::new(FailureKind::MalformedBody, err.to_string()))?;

        match payload.mcqs.filter(|text| !text.is_empty()) {
            Some(mcqs) => Ok(McqResponse {
                mcqs,
                status: status.as_u16(),
                byte_len: body.len() as u64,
            }),
            None => Err(SubmitError::new(
                FailureKind::ServerError {
                    message: payload.error,
                },
                "response carried no mcqs",
            )),
        }
    }
}

/// True for `application/json` and `+json` media types, ignoring parameters.
fn is_json(content_type: Option<&str>) -> bool {
    let Some(ct) = content_type else {
        return false;
    };
    let essence = ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn too_large(max_bytes: u64, actual: u64) -> SubmitError {
    SubmitError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_detection_ignores_parameters_and_case() {
        assert!(is_json(Some("application/json")));
        assert!(is_json(Some("Application/JSON; charset=utf-8")));
        assert!(is_json(Some("application/problem+json")));
        assert!(!is_json(Some("text/html")));
        assert!(!is_json(Some("text/plain; charset=utf-8")));
        assert!(!is_json(None));
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let settings = SubmitSettings {
            endpoint: "ftp://example.com/upload".to_string(),
            ..SubmitSettings::default()
        };
        let err = ReqwestSubmitter::new(settings).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);

        let settings = SubmitSettings {
            endpoint: "not a url".to_string(),
            ..SubmitSettings::default()
        };
        let err = ReqwestSubmitter::new(settings).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    }

    #[test]
    fn default_endpoint_is_local_backend() {
        let submitter = ReqwestSubmitter::new(SubmitSettings::default()).unwrap();
        assert_eq!(submitter.endpoint.as_str(), DEFAULT_ENDPOINT);
    }
}
