//! RESP encoder.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use log::debug;

use crate::error::EncodeError;
use crate::types::Pubsub;
use crate::types::RespValue;
use crate::utils::*;

/// Number of elements in every push frame: kind, channel, payload.
const PUBSUB_ARITY: usize = 3;

/// Trait for encoding RESP values.
pub trait RespEncoder {
	/// Append the wire form to `buf`. On error `buf` is left as it was.
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError>;

	fn encode(&self) -> Result<Bytes, EncodeError> {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf)?;
		Ok(buf.freeze())
	}
}

impl RespEncoder for RespValue {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		let start = buf.len();
		let result = encode_value(buf, self);
		if let Err(e) = &result {
			debug!("Rejected {} for encoding: {}", self.type_name(), e);
			buf.truncate(start);
		}
		result
	}
}

/// Encode a single value into a fresh buffer.
pub fn encode(value: &RespValue) -> Result<Bytes, EncodeError> {
	value.encode()
}

fn encode_value(buf: &mut BytesMut, value: &RespValue) -> Result<(), EncodeError> {
	match value {
		RespValue::SimpleString(s) => encode_line(buf, SIMPLE_STRING, s)?,
		RespValue::ErrorString(e) => encode_line(buf, ERROR, e)?,
		RespValue::Integer(i) => encode_integer(buf, *i),
		RespValue::BlobString(s) => encode_blob(buf, BULK_STRING, s),
		RespValue::NullBulkString => buf.put_slice(b"$-1\r\n"),
		RespValue::NullArray => buf.put_slice(b"*-1\r\n"),
		RespValue::Array(arr) => encode_array(buf, arr)?,
		RespValue::Null => encode_null(buf),
		RespValue::Double(d) => encode_double(buf, *d),
		RespValue::Boolean(b) => encode_boolean(buf, *b),
		RespValue::BlobError(e) => encode_blob(buf, BULK_ERROR, e),
		RespValue::VerbatimString { format, data } => encode_verbatim_string(buf, format, data),
		RespValue::BigNumber(n) => encode_big_number(buf, n)?,
		RespValue::Map(m) => encode_pairs(buf, MAP, m)?,
		RespValue::Set(s) => encode_set(buf, s)?,
		RespValue::Attribute(a) => encode_pairs(buf, ATTRIBUTE, a)?,
		RespValue::Pubsub(p) => encode_pubsub(buf, p)?,
	}
	Ok(())
}

#[inline]
fn encode_line(buf: &mut BytesMut, marker: u8, text: &str) -> Result<(), EncodeError> {
	if text.bytes().any(|b| b == b'\r' || b == b'\n') {
		return Err(EncodeError::InvalidSimpleStringContent(text.to_string()));
	}
	buf.put_u8(marker);
	buf.put_slice(text.as_bytes());
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn encode_integer(buf: &mut BytesMut, i: i64) {
	buf.put_u8(INTEGER);
	buf.put_slice(i.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_length(buf: &mut BytesMut, marker: u8, length: usize) {
	buf.put_u8(marker);
	buf.put_slice(length.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_blob(buf: &mut BytesMut, marker: u8, s: &[u8]) {
	encode_length(buf, marker, s.len());
	buf.put_slice(s);
	buf.put_slice(CRLF);
}

fn encode_array(buf: &mut BytesMut, arr: &[RespValue]) -> Result<(), EncodeError> {
	encode_length(buf, ARRAY, arr.len());
	for value in arr {
		encode_value(buf, value)?;
	}
	Ok(())
}

#[inline]
fn encode_null(buf: &mut BytesMut) {
	buf.put_u8(NULL);
	buf.put_slice(CRLF);
}

#[inline]
fn encode_boolean(buf: &mut BytesMut, b: bool) {
	buf.put_u8(BOOLEAN);
	buf.put_u8(if b { b't' } else { b'f' });
	buf.put_slice(CRLF);
}

#[inline]
fn encode_double(buf: &mut BytesMut, d: f64) {
	buf.put_u8(DOUBLE);
	buf.put_slice(format_double(d).as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_big_number(buf: &mut BytesMut, n: &[u8]) -> Result<(), EncodeError> {
	if !is_decimal(n) {
		return Err(EncodeError::InvalidBigNumber(
			String::from_utf8_lossy(n).into_owned(),
		));
	}
	buf.put_u8(BIG_NUMBER);
	buf.put_slice(n);
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn encode_verbatim_string(buf: &mut BytesMut, format: &[u8; 3], data: &[u8]) {
	// Length covers the format, the ':' separator and the data.
	encode_length(buf, VERBATIM_STRING, format.len() + 1 + data.len());
	buf.put_slice(format);
	buf.put_u8(b':');
	buf.put_slice(data);
	buf.put_slice(CRLF);
}

fn encode_pairs(
	buf: &mut BytesMut,
	marker: u8,
	pairs: &BTreeMap<RespValue, RespValue>,
) -> Result<(), EncodeError> {
	encode_length(buf, marker, pairs.len());
	for (key, value) in pairs {
		encode_value(buf, key)?;
		encode_value(buf, value)?;
	}
	Ok(())
}

fn encode_set(buf: &mut BytesMut, set: &BTreeSet<RespValue>) -> Result<(), EncodeError> {
	encode_length(buf, SET, set.len());
	for value in set {
		encode_value(buf, value)?;
	}
	Ok(())
}

fn encode_pubsub(buf: &mut BytesMut, pubsub: &Pubsub) -> Result<(), EncodeError> {
	encode_length(buf, PUSH, PUBSUB_ARITY);
	encode_line(buf, SIMPLE_STRING, pubsub.kind.as_str())?;
	encode_blob(buf, BULK_STRING, pubsub.channel.as_bytes());
	encode_value(buf, &pubsub.value)
}
