//! Wire constants and line-level parsing helpers.

use crate::error::DecodeError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers for RESP2
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Type markers for RESP3
pub const NULL: u8 = b'_';
pub const BOOLEAN: u8 = b'#';
pub const DOUBLE: u8 = b',';
pub const BIG_NUMBER: u8 = b'(';
pub const BULK_ERROR: u8 = b'!';
pub const VERBATIM_STRING: u8 = b'=';
pub const MAP: u8 = b'%';
pub const SET: u8 = b'~';
pub const ATTRIBUTE: u8 = b'|';
pub const PUSH: u8 = b'>';

/// Find the position of CRLF in a byte slice
#[inline]
pub fn find_crlf(buf: &[u8]) -> Option<usize> {
	memchr::memmem::find(buf, CRLF)
}

/// Check if a type marker is valid
#[inline]
pub fn is_valid_type_marker(marker: u8) -> bool {
	matches!(
		marker,
		SIMPLE_STRING
			| ERROR | INTEGER
			| BULK_STRING
			| ARRAY | NULL
			| BOOLEAN | DOUBLE
			| BIG_NUMBER
			| BULK_ERROR
			| VERBATIM_STRING
			| MAP | SET
			| ATTRIBUTE
			| PUSH
	)
}

/// `-?[0-9]+`
#[inline]
pub fn is_decimal(buf: &[u8]) -> bool {
	let digits = buf.strip_prefix(b"-").unwrap_or(buf);
	!digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

fn lossy(buf: &[u8]) -> String {
	String::from_utf8_lossy(buf).into_owned()
}

/// Parse a signed 64-bit integer line: optional `-`, then digits only.
pub fn parse_integer(buf: &[u8]) -> Result<i64, DecodeError> {
	if !is_decimal(buf) {
		return Err(DecodeError::InvalidInteger(lossy(buf)));
	}
	// Only ASCII digits and a sign remain, so from_utf8 cannot fail.
	std::str::from_utf8(buf)?
		.parse::<i64>()
		.map_err(|_| DecodeError::InvalidInteger(lossy(buf)))
}

/// Length field of the legacy RESP2 nulls, `$-1` and `*-1`.
pub const NULL_LENGTH: &[u8] = b"-1";

/// Parse a length or count field: plain digits, no sign, no leading zeros.
pub fn parse_length(buf: &[u8]) -> Result<usize, DecodeError> {
	let well_formed = match buf {
		[] => false,
		[b'0'] => true,
		[b'0', ..] => false,
		_ => buf.iter().all(u8::is_ascii_digit),
	};
	if !well_formed {
		return Err(DecodeError::InvalidLength(lossy(buf)));
	}
	let mut length: usize = 0;
	for &digit in buf {
		length = length
			.checked_mul(10)
			.and_then(|l| l.checked_add(usize::from(digit - b'0')))
			.ok_or_else(|| DecodeError::InvalidLength(lossy(buf)))?;
	}
	Ok(length)
}

/// Parse a double line. `inf`, `-inf` and `nan` are matched exactly;
/// anything else must be a plain decimal or exponent number.
pub fn parse_double(buf: &[u8]) -> Result<f64, DecodeError> {
	match buf {
		b"inf" => Ok(f64::INFINITY),
		b"-inf" => Ok(f64::NEG_INFINITY),
		b"nan" => Ok(f64::NAN),
		_ => {
			// Rejects the spellings str::parse would otherwise accept,
			// such as "Infinity" or "NaN".
			let numeric = !buf.is_empty()
				&& buf
					.iter()
					.all(|&b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'));
			if !numeric {
				return Err(DecodeError::InvalidDouble(lossy(buf)));
			}
			std::str::from_utf8(buf)?
				.parse::<f64>()
				.map_err(|_| DecodeError::InvalidDouble(lossy(buf)))
		}
	}
}

/// Render a double the way it goes on the wire.
pub fn format_double(d: f64) -> String {
	if d.is_nan() {
		"nan".to_string()
	} else if d.is_infinite() {
		if d.is_sign_positive() {
			"inf".to_string()
		} else {
			"-inf".to_string()
		}
	} else {
		d.to_string()
	}
}
