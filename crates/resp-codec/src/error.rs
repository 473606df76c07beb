//! Error types for RESP encoding, decoding and value access.

use thiserror::Error;

/// Main error type for RESP operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RespError {
	/// Error during encoding
	#[error("Encode error: {0}")]
	Encode(#[from] EncodeError),

	/// Error during decoding
	#[error("Decode error: {0}")]
	Decode(#[from] DecodeError),

	/// Error while extracting a typed value
	#[error("Access error: {0}")]
	Access(#[from] AccessError),
}

/// Errors that can occur during RESP encoding.
///
/// Always detected before anything is written to the output buffer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
	/// Simple or error string contains CR or LF
	#[error("Simple string contains CR or LF: {0:?}")]
	InvalidSimpleStringContent(String),

	/// Big number payload is not a decimal digit sequence
	#[error("Invalid big number: {0:?}")]
	InvalidBigNumber(String),
}

/// Errors that can occur during RESP decoding.
///
/// Every variant except `UnexpectedEof` is connection-fatal: RESP has no
/// resynchronization marker, so the stream cannot be trusted afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
	/// Input ended before a complete value (one-shot parsing only)
	#[error("Unexpected end of input")]
	UnexpectedEof,

	/// Unknown type marker
	#[error("Unknown type marker: 0x{0:02X}")]
	UnknownType(u8),

	/// Bad length or count field
	#[error("Invalid length: {0:?}")]
	InvalidLength(String),

	/// Invalid integer value
	#[error("Invalid integer: {0:?}")]
	InvalidInteger(String),

	/// Invalid double value
	#[error("Invalid double: {0:?}")]
	InvalidDouble(String),

	/// Boolean other than `t` or `f`
	#[error("Invalid boolean: {0:?}")]
	InvalidBoolean(String),

	/// Big number that is not a decimal digit sequence
	#[error("Invalid big number: {0:?}")]
	InvalidBigNumber(String),

	/// RESP3 null with a non-empty body
	#[error("Null must have an empty body")]
	InvalidNull,

	/// Text type carrying invalid UTF-8
	#[error("UTF-8 error: {0}")]
	InvalidUtf8(String),

	/// Blob payload not followed by CRLF
	#[error("Missing CRLF after blob payload")]
	MissingCrlf,

	/// Verbatim string without a `xxx:` format prefix
	#[error("Verbatim string must start with a 3-byte format and ':'")]
	InvalidVerbatimString,

	/// Push frame with the wrong shape
	#[error("Malformed pubsub message: {0}")]
	MalformedPubsub(String),

	/// Push frame kind other than message/subscribe/unsubscribe
	#[error("Unknown pubsub kind: {0:?}")]
	UnknownPubsubKind(String),

	/// Repeated map key or set member
	#[error("Duplicate element in map, set or attribute")]
	DuplicateElement,

	/// Aggregates nested beyond the configured limit
	#[error("Nesting depth exceeds limit of {max}")]
	DepthExceeded { max: usize },

	/// Blob length above the configured limit
	#[error("Blob of {len} bytes exceeds limit of {max} bytes")]
	BlobTooLarge { len: usize, max: usize },

	/// Line without CRLF grew beyond the configured limit
	#[error("Line exceeds maximum length of {max} bytes")]
	LineTooLong { max: usize },
}

/// Errors raised by the typed accessors on `RespValue`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
	/// The value is not of the requested variant
	#[error("Type mismatch: expected {expected}, found {found}")]
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},

	/// Payload bytes are not valid UTF-8
	#[error("String decoding error: {0}")]
	StringDecoding(String),
}

impl From<std::str::Utf8Error> for DecodeError {
	fn from(e: std::str::Utf8Error) -> Self {
		DecodeError::InvalidUtf8(e.to_string())
	}
}

impl From<std::string::FromUtf8Error> for DecodeError {
	fn from(e: std::string::FromUtf8Error) -> Self {
		DecodeError::InvalidUtf8(e.to_string())
	}
}

impl From<std::str::Utf8Error> for AccessError {
	fn from(e: std::str::Utf8Error) -> Self {
		AccessError::StringDecoding(e.to_string())
	}
}
