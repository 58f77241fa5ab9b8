use std::fmt;

pub const TIMEOUT_MESSAGE: &str = "Request timeout - server may be down";
pub const UNREACHABLE_MESSAGE: &str = "Cannot connect to server. Please check if backend is running.";

/// What went wrong with a remote call, independent of the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    TimedOut,
    /// The service answered with a non-2xx status.
    Status {
        status: u16,
        server_message: Option<String>,
    },
    /// The request went out but no response came back.
    NoResponse(String),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    ServerError {
        status: u16,
        server_message: Option<String>,
    },
    Unreachable,
    Unexpected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ClassifiedError {}

pub fn classify(failure: Failure) -> ClassifiedError {
    match failure {
        Failure::TimedOut => ClassifiedError {
            kind: ErrorKind::Timeout,
            message: TIMEOUT_MESSAGE.to_string(),
        },
        Failure::Status {
            status,
            server_message,
        } => {
            let server_message = server_message.filter(|m| !m.trim().is_empty());
            let message = match &server_message {
                Some(detail) => format!("Server error: {} - {}", status, detail),
                None => format!("Server error: {}", status),
            };
            ClassifiedError {
                kind: ErrorKind::ServerError {
                    status,
                    server_message,
                },
                message,
            }
        }
        Failure::NoResponse(_) => ClassifiedError {
            kind: ErrorKind::Unreachable,
            message: UNREACHABLE_MESSAGE.to_string(),
        },
        Failure::Other(raw) => ClassifiedError {
            message: format!("Unexpected error: {}", raw),
            kind: ErrorKind::Unexpected(raw),
        },
    }
}

impl From<reqwest::Error> for Failure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Failure::TimedOut
        } else if let Some(status) = e.status() {
            Failure::Status {
                status: status.as_u16(),
                server_message: None,
            }
        } else if e.is_builder() || e.is_decode() || e.is_redirect() {
            Failure::Other(e.to_string())
        } else if e.is_connect() || e.is_request() || e.is_body() {
            Failure::NoResponse(e.to_string())
        } else {
            Failure::Other(e.to_string())
        }
    }
}

impl From<reqwest::Error> for ClassifiedError {
    fn from(e: reqwest::Error) -> Self {
        classify(Failure::from(e))
    }
}
