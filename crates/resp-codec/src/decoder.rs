//! Incremental RESP decoder.
//!
//! The decoder consumes bytes as it goes and keeps everything it has already
//! parsed (open aggregates, a blob whose length is known) across calls, so a
//! frame may be split anywhere between reads.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use bytes::Buf;
use bytes::Bytes;
use bytes::BytesMut;
use log::debug;
use log::trace;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::types::Pubsub;
use crate::types::PubsubKind;
use crate::types::RespValue;
use crate::utils::*;

/// Capacity reserved up front for an aggregate, regardless of its declared
/// count.
const MAX_PREALLOC: usize = 1024;

/// Element count of a push frame.
const PUBSUB_ARITY: usize = 3;

/// A stateful RESP decoder that supports streaming.
///
/// One decoder belongs to one connection. Drive it either with [`feed`],
/// which buffers internally, or with [`decode`] over a buffer the caller
/// owns; do not mix the two on the same instance.
///
/// Any error is terminal: the decoder remembers it and returns it from every
/// later call.
///
/// [`feed`]: RespDecoder::feed
/// [`decode`]: RespDecoder::decode
#[derive(Debug, Default)]
pub struct RespDecoder {
	config: DecoderConfig,
	buffer: BytesMut,
	frames: Vec<Frame>,
	pending: Option<PendingBlob>,
	// Bytes consumed so far by the top-level frame in progress.
	frame_len: usize,
	last_frame_len: usize,
	failed: Option<DecodeError>,
}

/// A blob whose length line has been consumed but whose payload has not.
#[derive(Debug, Clone, Copy)]
struct PendingBlob {
	marker: u8,
	len: usize,
}

#[derive(Debug)]
enum Frame {
	Array {
		expected: usize,
		elements: Vec<RespValue>,
	},
	Map {
		expected: usize,
		elements: BTreeMap<RespValue, RespValue>,
		key: Option<RespValue>, // Temporary storage for key
		attribute: bool,
	},
	Set {
		expected: usize,
		elements: BTreeSet<RespValue>,
	},
	Pubsub {
		kind: Option<PubsubKind>,
		channel: Option<String>,
	},
}

// Helper enum for parse_step
enum ParsedItem {
	Value(RespValue),
	FramePushed,
}

/// What a complete type line announces.
enum Header {
	Value(RespValue),
	Blob { marker: u8, len: usize },
	Aggregate { marker: u8, len: usize },
	Pubsub,
}

impl Frame {
	/// Add a child value. Returns the finished aggregate once the last
	/// expected child has arrived.
	fn absorb(&mut self, value: RespValue) -> Result<Option<RespValue>, DecodeError> {
		match self {
			Frame::Array { expected, elements } => {
				elements.push(value);
				if elements.len() == *expected {
					Ok(Some(RespValue::Array(std::mem::take(elements))))
				} else {
					Ok(None)
				}
			}
			Frame::Map {
				expected,
				elements,
				key,
				attribute,
			} => {
				let Some(k) = key.take() else {
					*key = Some(value);
					return Ok(None);
				};
				if elements.insert(k, value).is_some() {
					return Err(DecodeError::DuplicateElement);
				}
				if elements.len() < *expected {
					return Ok(None);
				}
				let pairs = std::mem::take(elements);
				Ok(Some(if *attribute {
					RespValue::Attribute(pairs)
				} else {
					RespValue::Map(pairs)
				}))
			}
			Frame::Set { expected, elements } => {
				if !elements.insert(value) {
					return Err(DecodeError::DuplicateElement);
				}
				if elements.len() == *expected {
					Ok(Some(RespValue::Set(std::mem::take(elements))))
				} else {
					Ok(None)
				}
			}
			Frame::Pubsub { kind, channel } => match (*kind, channel.take()) {
				(None, _) => {
					*kind = Some(pubsub_kind(&value)?);
					Ok(None)
				}
				(Some(_), None) => {
					*channel = Some(pubsub_channel(value)?);
					Ok(None)
				}
				(Some(kind), Some(channel)) => Ok(Some(RespValue::Pubsub(Pubsub {
					kind,
					channel,
					value: Box::new(value),
				}))),
			},
		}
	}
}

// Real servers send the kind as a blob string; this codec writes a simple
// string. Both are accepted.
fn pubsub_kind(value: &RespValue) -> Result<PubsubKind, DecodeError> {
	match value {
		RespValue::SimpleString(s) => PubsubKind::from_bytes(s.as_bytes()),
		RespValue::BlobString(b) => PubsubKind::from_bytes(b),
		other => Err(DecodeError::UnknownPubsubKind(format!(
			"<{}>",
			other.type_name()
		))),
	}
}

fn pubsub_channel(value: RespValue) -> Result<String, DecodeError> {
	match value {
		RespValue::BlobString(b) => Ok(String::from_utf8(b.to_vec())?),
		other => Err(DecodeError::MalformedPubsub(format!(
			"channel must be a blob string, found {}",
			other.type_name()
		))),
	}
}

fn parse_header(marker: u8, line: &[u8]) -> Result<Header, DecodeError> {
	let header = match marker {
		SIMPLE_STRING => Header::Value(RespValue::SimpleString(
			std::str::from_utf8(line)?.to_owned(),
		)),
		ERROR => Header::Value(RespValue::ErrorString(
			std::str::from_utf8(line)?.to_owned(),
		)),
		INTEGER => Header::Value(RespValue::Integer(parse_integer(line)?)),
		DOUBLE => Header::Value(RespValue::Double(parse_double(line)?)),
		BOOLEAN => {
			let value = match line {
				b"t" => true,
				b"f" => false,
				_ => {
					return Err(DecodeError::InvalidBoolean(
						String::from_utf8_lossy(line).into_owned(),
					));
				}
			};
			Header::Value(RespValue::Boolean(value))
		}
		NULL => {
			if !line.is_empty() {
				return Err(DecodeError::InvalidNull);
			}
			Header::Value(RespValue::Null)
		}
		BIG_NUMBER => {
			if !is_decimal(line) {
				return Err(DecodeError::InvalidBigNumber(
					String::from_utf8_lossy(line).into_owned(),
				));
			}
			Header::Value(RespValue::BigNumber(Bytes::copy_from_slice(line)))
		}
		BULK_STRING if line == NULL_LENGTH => Header::Value(RespValue::NullBulkString),
		ARRAY if line == NULL_LENGTH => Header::Value(RespValue::NullArray),
		BULK_STRING | BULK_ERROR | VERBATIM_STRING => Header::Blob {
			marker,
			len: parse_length(line)?,
		},
		ARRAY | MAP | SET | ATTRIBUTE => Header::Aggregate {
			marker,
			len: parse_length(line)?,
		},
		PUSH => {
			let count = parse_length(line)?;
			if count != PUBSUB_ARITY {
				return Err(DecodeError::MalformedPubsub(format!(
					"expected {} elements, found {}",
					PUBSUB_ARITY, count
				)));
			}
			Header::Pubsub
		}
		_ => return Err(DecodeError::UnknownType(marker)),
	};
	Ok(header)
}

impl RespDecoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: DecoderConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn config(&self) -> &DecoderConfig {
		&self.config
	}

	/// Bytes held in the internal buffer, not yet part of a decoded value.
	pub fn buffered(&self) -> usize {
		self.buffer.len()
	}

	/// True when no partial frame is held, neither as parse state nor as
	/// internally buffered bytes.
	pub fn is_idle(&self) -> bool {
		self.frames.is_empty()
			&& self.pending.is_none()
			&& self.frame_len == 0
			&& self.buffer.is_empty()
	}

	/// Wire length of the most recently completed top-level value.
	pub fn last_frame_len(&self) -> usize {
		self.last_frame_len
	}

	/// Feed bytes read from the transport.
	///
	/// Returns every top-level value completed by this chunk, together with
	/// the number of bytes those values occupied on the wire. Bytes of an
	/// unfinished frame stay buffered for the next call.
	pub fn feed(&mut self, bytes: &[u8]) -> Result<(Vec<RespValue>, usize), DecodeError> {
		if let Some(e) = &self.failed {
			return Err(e.clone());
		}
		self.buffer.extend_from_slice(bytes);

		let mut buf = std::mem::take(&mut self.buffer);
		let mut values = Vec::new();
		let mut consumed = 0;
		let result = loop {
			match self.decode(&mut buf) {
				Ok(Some(value)) => {
					consumed += self.last_frame_len;
					values.push(value);
				}
				Ok(None) => break Ok(()),
				Err(e) => break Err(e),
			}
		};
		self.buffer = buf;
		result.map(|()| (values, consumed))
	}

	/// Decode one value from a caller-owned buffer.
	///
	/// Consumes bytes as parsing progresses. Returns `Ok(None)` when `buf`
	/// runs out before the value is complete; call again once more bytes
	/// have been appended.
	pub fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<RespValue>, DecodeError> {
		if let Some(e) = &self.failed {
			return Err(e.clone());
		}
		match self.decode_frame(buf) {
			Ok(Some(value)) => Ok(Some(value)),
			Ok(None) => {
				if !buf.is_empty() || !self.frames.is_empty() || self.pending.is_some() {
					trace!(
						"Incomplete frame: depth {}, {} bytes waiting",
						self.frames.len(),
						buf.len()
					);
				}
				Ok(None)
			}
			Err(e) => {
				debug!("RESP decode failed, stream is no longer usable: {}", e);
				self.failed = Some(e.clone());
				Err(e)
			}
		}
	}

	fn decode_frame(&mut self, buf: &mut BytesMut) -> Result<Option<RespValue>, DecodeError> {
		loop {
			match self.parse_step(buf)? {
				Some(ParsedItem::FramePushed) => continue,
				Some(ParsedItem::Value(val)) => {
					if let Some(root) = self.handle_parsed_value(val)? {
						return Ok(Some(root));
					}
				}
				None => return Ok(None),
			}
		}
	}

	// Inject a finished value into the innermost open aggregate, closing
	// aggregates upwards as they fill. Returns the value once the root is
	// complete.
	fn handle_parsed_value(
		&mut self,
		mut value: RespValue,
	) -> Result<Option<RespValue>, DecodeError> {
		loop {
			let Some(frame) = self.frames.last_mut() else {
				self.last_frame_len = std::mem::take(&mut self.frame_len);
				return Ok(Some(value));
			};
			match frame.absorb(value)? {
				Some(done) => {
					self.frames.pop();
					value = done;
				}
				None => return Ok(None),
			}
		}
	}

	#[inline]
	fn consume(&mut self, buf: &mut BytesMut, n: usize) {
		buf.advance(n);
		self.frame_len += n;
	}

	/// Tries to parse the next token.
	/// If it's a primitive, returns `Ok(Some(ParsedItem::Value(v)))`.
	/// If it's a collection start, pushes a frame and returns
	/// `Ok(Some(ParsedItem::FramePushed))`. If incomplete, returns `Ok(None)`.
	fn parse_step(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, DecodeError> {
		if let Some(blob) = self.pending {
			return self.parse_blob_payload(buf, blob);
		}

		let Some(&marker) = buf.first() else {
			return Ok(None);
		};
		if !is_valid_type_marker(marker) {
			return Err(DecodeError::UnknownType(marker));
		}

		let max_line_len = self.config.max_line_len;
		let Some(line_len) = find_crlf(&buf[1..]) else {
			// Marker, line and a possible trailing '\r'.
			if buf.len() > max_line_len.saturating_add(2) {
				return Err(DecodeError::LineTooLong { max: max_line_len });
			}
			return Ok(None);
		};
		if line_len > max_line_len {
			return Err(DecodeError::LineTooLong { max: max_line_len });
		}

		let header = parse_header(marker, &buf[1..1 + line_len])?;
		self.consume(buf, 1 + line_len + CRLF.len());

		match header {
			Header::Value(value) => Ok(Some(ParsedItem::Value(value))),
			Header::Blob { marker, len } => {
				if len > self.config.max_blob_len {
					return Err(DecodeError::BlobTooLarge {
						len,
						max: self.config.max_blob_len,
					});
				}
				if marker == VERBATIM_STRING && len < 4 {
					return Err(DecodeError::InvalidVerbatimString);
				}
				let blob = PendingBlob { marker, len };
				self.pending = Some(blob);
				self.parse_blob_payload(buf, blob)
			}
			Header::Aggregate { marker, len } => self.start_aggregate(marker, len),
			Header::Pubsub => {
				self.check_depth()?;
				self.frames.push(Frame::Pubsub {
					kind: None,
					channel: None,
				});
				Ok(Some(ParsedItem::FramePushed))
			}
		}
	}

	fn parse_blob_payload(
		&mut self,
		buf: &mut BytesMut,
		blob: PendingBlob,
	) -> Result<Option<ParsedItem>, DecodeError> {
		let Some(needed) = blob.len.checked_add(CRLF.len()) else {
			return Err(DecodeError::BlobTooLarge {
				len: blob.len,
				max: self.config.max_blob_len,
			});
		};
		if buf.len() < needed {
			return Ok(None);
		}
		self.pending = None;

		let data = buf.split_to(blob.len).freeze();
		if &buf[..CRLF.len()] != CRLF {
			return Err(DecodeError::MissingCrlf);
		}
		buf.advance(CRLF.len());
		self.frame_len += blob.len + CRLF.len();

		let value = match blob.marker {
			BULK_STRING => RespValue::BlobString(data),
			BULK_ERROR => RespValue::BlobError(data),
			_ => {
				// =15\r\ntxt:Some string\r\n
				if data[3] != b':' {
					return Err(DecodeError::InvalidVerbatimString);
				}
				RespValue::VerbatimString {
					format: [data[0], data[1], data[2]],
					data: data.slice(4..),
				}
			}
		};
		Ok(Some(ParsedItem::Value(value)))
	}

	fn check_depth(&self) -> Result<(), DecodeError> {
		if self.frames.len() >= self.config.max_depth {
			return Err(DecodeError::DepthExceeded {
				max: self.config.max_depth,
			});
		}
		Ok(())
	}

	fn start_aggregate(&mut self, marker: u8, len: usize) -> Result<Option<ParsedItem>, DecodeError> {
		// Empty aggregates still count as a nesting level.
		self.check_depth()?;

		if len == 0 {
			let value = match marker {
				ARRAY => RespValue::Array(Vec::new()),
				MAP => RespValue::Map(BTreeMap::new()),
				SET => RespValue::Set(BTreeSet::new()),
				_ => RespValue::Attribute(BTreeMap::new()),
			};
			return Ok(Some(ParsedItem::Value(value)));
		}

		let frame = match marker {
			ARRAY => Frame::Array {
				expected: len,
				elements: Vec::with_capacity(len.min(MAX_PREALLOC)),
			},
			SET => Frame::Set {
				expected: len,
				elements: BTreeSet::new(),
			},
			_ => Frame::Map {
				expected: len,
				elements: BTreeMap::new(),
				key: None,
				attribute: marker == ATTRIBUTE,
			},
		};
		self.frames.push(frame);
		Ok(Some(ParsedItem::FramePushed))
	}
}

/// Convenience function for one-off parsing.
///
/// Parses the first value in `buf` and removes exactly its bytes. If `buf`
/// holds only part of a value it is left untouched and
/// `DecodeError::UnexpectedEof` is returned. For streaming, use
/// `RespDecoder` directly.
pub fn parse(buf: &mut BytesMut) -> Result<RespValue, DecodeError> {
	let mut decoder = RespDecoder::new();
	let mut scratch = buf.clone();
	match decoder.decode(&mut scratch)? {
		Some(value) => {
			buf.advance(decoder.last_frame_len());
			Ok(value)
		}
		None => Err(DecodeError::UnexpectedEof),
	}
}
