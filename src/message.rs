//! # HTTP Message Helpers
//!
//! Glue between a [`Registry`] and [`http`] request/response types: decode a
//! request body with the protocol chosen by its `Content-Type`, and encode a
//! response with the protocol chosen by the request's `Accept` header.
//!
//! Every failure comes back as a [`NegotiationError`] carrying the status
//! code a server should answer with:
//!
//! | Outcome | Status |
//! |---|---|
//! | malformed `Accept` / `Content-Type` | `400 Bad Request` |
//! | nothing acceptable for `Accept` | `406 Not Acceptable` |
//! | nothing decodes `Content-Type` | `415 Unsupported Media Type` |
//! | body fails to decode | `400 Bad Request` |
//! | value fails to encode | `500 Internal Server Error` |

use crate::error::ParseError;
use crate::protocol::CodecError;
use crate::registry::{self, Registry};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Why a request could not be decoded or a response could not be encoded.
#[derive(Debug)]
pub enum NegotiationError {
    /// The `Accept` or `Content-Type` header is malformed
    Header(ParseError),
    /// No registered protocol is acceptable to the client
    NotAcceptable,
    /// No registered protocol handles the request's content type
    UnsupportedMediaType,
    /// The request body could not be decoded
    Decode(CodecError),
    /// The response value could not be encoded
    Encode(CodecError),
}

impl NegotiationError {
    /// The HTTP status a server should respond with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            NegotiationError::Header(_) | NegotiationError::Decode(_) => StatusCode::BAD_REQUEST,
            NegotiationError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            NegotiationError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            NegotiationError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for NegotiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationError::Header(err) => write!(f, "bad negotiation header: {}", err),
            NegotiationError::NotAcceptable | NegotiationError::UnsupportedMediaType => {
                write!(f, "no protocol matched the request")
            }
            NegotiationError::Decode(err) => write!(f, "failed to decode request body: {}", err),
            NegotiationError::Encode(err) => write!(f, "failed to encode response: {}", err),
        }
    }
}

impl std::error::Error for NegotiationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NegotiationError::Header(err) => Some(err),
            NegotiationError::Decode(err) | NegotiationError::Encode(err) => {
                let err: &(dyn std::error::Error + 'static) = &**err;
                Some(err)
            }
            NegotiationError::NotAcceptable | NegotiationError::UnsupportedMediaType => None,
        }
    }
}

impl From<ParseError> for NegotiationError {
    fn from(err: ParseError) -> Self {
        NegotiationError::Header(err)
    }
}

/// All non-empty `Accept` values joined with `, `, as RFC 9110 allows them
/// to be split across header lines.
fn accept_header(headers: &HeaderMap) -> Result<String, ParseError> {
    let mut values = Vec::new();
    for value in headers.get_all(ACCEPT) {
        let value = value.to_str().map_err(|_| ParseError::InvalidEncoding)?.trim();
        if !value.is_empty() {
            values.push(value);
        }
    }
    Ok(values.join(", "))
}

fn content_type_header(headers: &HeaderMap) -> Result<&str, ParseError> {
    match headers.get(CONTENT_TYPE) {
        Some(value) => value.to_str().map_err(|_| ParseError::InvalidEncoding),
        None => Ok(""),
    }
}

impl Registry {
    /// Decode a request body with the protocol matching its `Content-Type`.
    ///
    /// A missing `Content-Type` accepts any protocol, so the default (or the
    /// first registered) one is used.
    pub fn decode_request<B: AsRef<[u8]>>(
        &self,
        request: &Request<B>,
    ) -> Result<Value, NegotiationError> {
        let content_type = content_type_header(request.headers())?;
        let protocol = self
            .match_content_type(content_type)?
            .ok_or(NegotiationError::UnsupportedMediaType)?;
        let mut body = request.body().as_ref();
        protocol
            .decode(&mut body)
            .map_err(NegotiationError::Decode)
    }

    /// Decode a request body straight into `T`.
    pub fn decode_request_as<T: DeserializeOwned, B: AsRef<[u8]>>(
        &self,
        request: &Request<B>,
    ) -> Result<T, NegotiationError> {
        let value = self.decode_request(request)?;
        serde_json::from_value(value).map_err(|err| NegotiationError::Decode(err.into()))
    }

    /// Encode `data` with the protocol the request's `Accept` header prefers.
    ///
    /// On success the response has status `200` and a `Content-Type` naming
    /// the chosen protocol. Nothing is built on failure.
    pub fn encode_response<T: Serialize + ?Sized, B>(
        &self,
        data: &T,
        request: &Request<B>,
    ) -> Result<Response<Vec<u8>>, NegotiationError> {
        let accept = accept_header(request.headers())?;
        let protocol = self
            .match_header(&accept)?
            .ok_or(NegotiationError::NotAcceptable)?;

        let value = serde_json::to_value(data).map_err(|err| NegotiationError::Encode(err.into()))?;
        let mut body = Vec::new();
        protocol
            .encode(&value, &mut body)
            .map_err(NegotiationError::Encode)?;

        let content_type = HeaderValue::from_str(protocol.content_type())
            .map_err(|err| NegotiationError::Encode(err.into()))?;
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::OK;
        response.headers_mut().insert(CONTENT_TYPE, content_type);
        Ok(response)
    }
}

/// [`Registry::decode_request`] on the process-wide registry.
pub fn decode_request<B: AsRef<[u8]>>(request: &Request<B>) -> Result<Value, NegotiationError> {
    registry::global().decode_request(request)
}

/// [`Registry::encode_response`] on the process-wide registry.
pub fn encode_response<T: Serialize + ?Sized, B>(
    data: &T,
    request: &Request<B>,
) -> Result<Response<Vec<u8>>, NegotiationError> {
    registry::global().encode_response(data, request)
}
