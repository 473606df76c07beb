//! # resp-codec - Redis Serialization Protocol codec
//!
//! An incremental RESP decoder and an encoder for Rust, covering every RESP2
//! and RESP3 type.
//!
//! ## Features
//!
//! - **Complete value model**: all seventeen wire types, including the legacy
//!   RESP2 nulls, attributes and pub/sub pushes
//! - **Streaming decoder**: frames may be split at any byte; parsed state is
//!   kept across reads
//! - **Structural equality**: maps, sets and attributes compare and hash by
//!   content, so aggregates can be map keys
//! - **Bounded decoding**: nesting depth, blob size and line length limits
//!   for untrusted input
//!
//! ## Example
//!
//! ```rust
//! use resp_codec::RespDecoder;
//! use resp_codec::RespEncoder;
//! use resp_codec::RespValue;
//!
//! let command = RespValue::array([RespValue::blob_string("GET"), RespValue::blob_string("key")]);
//! let bytes = command.encode().unwrap();
//! assert_eq!(&bytes[..], b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n");
//!
//! // Decode a reply delivered in two reads
//! let mut decoder = RespDecoder::new();
//! let (values, _) = decoder.feed(b"+O").unwrap();
//! assert!(values.is_empty());
//! let (values, consumed) = decoder.feed(b"K\r\n").unwrap();
//! assert_eq!(values[0].string_value().unwrap(), "OK");
//! assert_eq!(consumed, 5);
//! ```

mod config;
mod decoder;
mod encode;
mod error;
mod types;
mod utils;

pub use config::DEFAULT_MAX_BLOB_LEN;
pub use config::DEFAULT_MAX_DEPTH;
pub use config::DEFAULT_MAX_LINE_LEN;
pub use config::DecoderConfig;
pub use decoder::RespDecoder;
pub use decoder::parse;
pub use encode::RespEncoder;
pub use encode::encode;
pub use error::AccessError;
pub use error::DecodeError;
pub use error::EncodeError;
pub use error::RespError;
pub use types::Pubsub;
pub use types::PubsubKind;
pub use types::RespValue;
