// ABOUTME: Error types for catalog requests: ErrorCode, CatalogError and DecodeError.
// ABOUTME: CatalogError carries the failing URL and operation; DecodeError covers the pure decoders.

use std::fmt;

/// Category of a failed catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request URL could not be built or parsed.
    InvalidRequest,
    /// The network exchange failed or the body could not be read.
    Transport,
    /// The response body did not match the expected XML/JSON shape.
    Decode,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidRequest => "invalid request",
            ErrorCode::Transport => "transport error",
            ErrorCode::Decode => "decode error",
        };
        write!(f, "{}", s)
    }
}

/// The error returned by every [`Connection`](crate::Connection) operation.
#[derive(Debug, thiserror::Error)]
pub struct CatalogError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl CatalogError {
    /// Create an InvalidRequest error.
    pub fn invalid_request(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Transport error.
    pub fn transport(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Transport,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Decode error.
    pub fn decode(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Decode,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    pub fn is_invalid_request(&self) -> bool {
        self.code == ErrorCode::InvalidRequest
    }

    pub fn is_transport(&self) -> bool {
        self.code == ErrorCode::Transport
    }

    pub fn is_decode(&self) -> bool {
        self.code == ErrorCode::Decode
    }
}

/// Errors produced while decoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The body is well-formed XML but its root element is not `<feed>`.
    #[error("expected <feed> root element, found <{0}>")]
    UnexpectedRoot(String),

    /// An attribute value could not be converted to its declared type.
    #[error("invalid value {value:?} for attribute `{attribute}`")]
    InvalidAttribute { attribute: String, value: String },

    /// The body contains no root element at all.
    #[error("document has no root element")]
    Empty,

    /// The body is not valid JSON for the lookup envelope.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn xml(position: u64, err: impl fmt::Display) -> Self {
        DecodeError::Xml {
            position,
            message: err.to_string(),
        }
    }
}
