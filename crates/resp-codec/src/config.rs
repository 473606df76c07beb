//! Decoder limits.

use serde::Deserialize;

/// Default maximum aggregate nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default maximum blob payload, matching Redis' `proto-max-bulk-len`.
pub const DEFAULT_MAX_BLOB_LEN: usize = 512 * 1024 * 1024;

/// Default maximum length of a line that has not yet seen its CRLF.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Limits applied by `RespDecoder` to untrusted input.
///
/// Deserializable so it can be embedded in a larger configuration file;
/// missing fields fall back to their defaults.
///
/// ```rust
/// use resp_codec::DecoderConfig;
///
/// let config = DecoderConfig::default().max_depth(16);
/// assert_eq!(config.max_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
	/// Aggregates may nest this deep; one level deeper is an error.
	pub max_depth: usize,
	/// Largest accepted `$`, `!` or `=` payload in bytes.
	pub max_blob_len: usize,
	/// Largest accepted line (simple string, number, length header).
	pub max_line_len: usize,
}

impl Default for DecoderConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			max_blob_len: DEFAULT_MAX_BLOB_LEN,
			max_line_len: DEFAULT_MAX_LINE_LEN,
		}
	}
}

impl DecoderConfig {
	/// Set the maximum aggregate nesting depth.
	pub fn max_depth(mut self, depth: usize) -> Self {
		self.max_depth = depth;
		self
	}

	/// Set the largest accepted blob payload in bytes.
	pub fn max_blob_len(mut self, len: usize) -> Self {
		self.max_blob_len = len;
		self
	}

	/// Set the largest accepted line in bytes.
	pub fn max_line_len(mut self, len: usize) -> Self {
		self.max_line_len = len;
		self
	}
}
