//! RESP data types and value representation.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use bytes::Bytes;

use crate::error::AccessError;
use crate::error::DecodeError;

/// Represents a RESP protocol value.
///
/// Supports both RESP2 and RESP3 types. Equality, ordering and hashing are
/// structural over the whole tree, which is what lets aggregates serve as
/// map keys and set members.
#[derive(Debug, Clone)]
pub enum RespValue {
	// RESP2 types
	/// Simple string: `+OK\r\n`
	SimpleString(String),

	/// Error: `-ERR message\r\n`
	ErrorString(String),

	/// Integer: `:1000\r\n`
	Integer(i64),

	/// Bulk string: `$6\r\nfoobar\r\n`
	BlobString(Bytes),

	/// Legacy null bulk string: `$-1\r\n`
	NullBulkString,

	/// Legacy null array: `*-1\r\n`
	NullArray,

	/// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`
	Array(Vec<RespValue>),

	// RESP3 types
	/// Null: `_\r\n`
	Null,

	/// Double: `,1.23\r\n`
	Double(f64),

	/// Boolean: `#t\r\n` or `#f\r\n`
	Boolean(bool),

	/// Bulk error: `!21\r\nSYNTAX invalid syntax\r\n`
	BlobError(Bytes),

	/// Verbatim string: `=15\r\ntxt:Some string\r\n`
	VerbatimString { format: [u8; 3], data: Bytes },

	/// Big number: `(3492890328409238509324850943850943825024385\r\n`
	BigNumber(Bytes),

	/// Map: `%2\r\n+first\r\n:1\r\n+second\r\n:2\r\n`
	Map(BTreeMap<RespValue, RespValue>),

	/// Set: `~2\r\n+orange\r\n+apple\r\n`
	Set(BTreeSet<RespValue>),

	/// Attribute: `|1\r\n+key-popularity\r\n:1\r\n`
	Attribute(BTreeMap<RespValue, RespValue>),

	/// Push: `>3\r\n+message\r\n$2\r\nch\r\n+hi\r\n`
	Pubsub(Pubsub),
}

/// A pub/sub push notification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pubsub {
	pub kind: PubsubKind,
	pub channel: String,
	pub value: Box<RespValue>,
}

/// The kinds of push notification the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PubsubKind {
	Message,
	Subscribe,
	Unsubscribe,
}

impl PubsubKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			PubsubKind::Message => "message",
			PubsubKind::Subscribe => "subscribe",
			PubsubKind::Unsubscribe => "unsubscribe",
		}
	}

	/// Parse the kind element of a push frame. Only exact lowercase names
	/// are accepted.
	pub fn from_bytes(name: &[u8]) -> Result<Self, DecodeError> {
		match name {
			b"message" => Ok(PubsubKind::Message),
			b"subscribe" => Ok(PubsubKind::Subscribe),
			b"unsubscribe" => Ok(PubsubKind::Unsubscribe),
			_ => Err(DecodeError::UnknownPubsubKind(
				String::from_utf8_lossy(name).into_owned(),
			)),
		}
	}
}

impl fmt::Display for PubsubKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl RespValue {
	/// Position of the variant in the total order across variants.
	fn rank(&self) -> u8 {
		match self {
			RespValue::SimpleString(_) => 0,
			RespValue::ErrorString(_) => 1,
			RespValue::Integer(_) => 2,
			RespValue::BlobString(_) => 3,
			RespValue::NullBulkString => 4,
			RespValue::NullArray => 5,
			RespValue::Array(_) => 6,
			RespValue::Null => 7,
			RespValue::Double(_) => 8,
			RespValue::Boolean(_) => 9,
			RespValue::BlobError(_) => 10,
			RespValue::VerbatimString { .. } => 11,
			RespValue::BigNumber(_) => 12,
			RespValue::Map(_) => 13,
			RespValue::Set(_) => 14,
			RespValue::Attribute(_) => 15,
			RespValue::Pubsub(_) => 16,
		}
	}

	/// Name of the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			RespValue::SimpleString(_) => "simple string",
			RespValue::ErrorString(_) => "error string",
			RespValue::Integer(_) => "integer",
			RespValue::BlobString(_) => "blob string",
			RespValue::NullBulkString => "null bulk string",
			RespValue::NullArray => "null array",
			RespValue::Array(_) => "array",
			RespValue::Null => "null",
			RespValue::Double(_) => "double",
			RespValue::Boolean(_) => "boolean",
			RespValue::BlobError(_) => "blob error",
			RespValue::VerbatimString { .. } => "verbatim string",
			RespValue::BigNumber(_) => "big number",
			RespValue::Map(_) => "map",
			RespValue::Set(_) => "set",
			RespValue::Attribute(_) => "attribute",
			RespValue::Pubsub(_) => "pubsub",
		}
	}

	fn mismatch(&self, expected: &'static str) -> AccessError {
		AccessError::TypeMismatch {
			expected,
			found: self.type_name(),
		}
	}

	/// Check if the value is an error
	pub fn is_error(&self) -> bool {
		matches!(self, RespValue::ErrorString(_) | RespValue::BlobError(_))
	}

	/// Check if the value is any of the RESP2 or RESP3 nulls
	pub fn is_null(&self) -> bool {
		matches!(
			self,
			RespValue::Null | RespValue::NullBulkString | RespValue::NullArray
		)
	}

	// Typed accessors

	pub fn integer_value(&self) -> Result<i64, AccessError> {
		match self {
			RespValue::Integer(i) => Ok(*i),
			_ => Err(self.mismatch("integer")),
		}
	}

	/// Text of a string-like value.
	///
	/// Simple and error strings are returned as-is; blob strings, blob errors
	/// and verbatim data must be valid UTF-8.
	pub fn string_value(&self) -> Result<String, AccessError> {
		match self {
			RespValue::SimpleString(s) | RespValue::ErrorString(s) => Ok(s.clone()),
			RespValue::BlobString(b)
			| RespValue::BlobError(b)
			| RespValue::VerbatimString { data: b, .. } => Ok(std::str::from_utf8(b)?.to_owned()),
			_ => Err(self.mismatch("string")),
		}
	}

	/// Raw payload of any string-like value.
	pub fn bytes_value(&self) -> Result<&[u8], AccessError> {
		match self {
			RespValue::SimpleString(s) | RespValue::ErrorString(s) => Ok(s.as_bytes()),
			RespValue::BlobString(b)
			| RespValue::BlobError(b)
			| RespValue::VerbatimString { data: b, .. } => Ok(&b[..]),
			_ => Err(self.mismatch("string")),
		}
	}

	pub fn array_value(&self) -> Result<&[RespValue], AccessError> {
		match self {
			RespValue::Array(a) => Ok(a.as_slice()),
			_ => Err(self.mismatch("array")),
		}
	}

	pub fn into_array(self) -> Result<Vec<RespValue>, AccessError> {
		match self {
			RespValue::Array(a) => Ok(a),
			other => Err(other.mismatch("array")),
		}
	}

	pub fn pubsub_value(&self) -> Result<&Pubsub, AccessError> {
		match self {
			RespValue::Pubsub(p) => Ok(p),
			_ => Err(self.mismatch("pubsub")),
		}
	}

	pub fn double_value(&self) -> Result<f64, AccessError> {
		match self {
			RespValue::Double(d) => Ok(*d),
			_ => Err(self.mismatch("double")),
		}
	}

	pub fn bool_value(&self) -> Result<bool, AccessError> {
		match self {
			RespValue::Boolean(b) => Ok(*b),
			_ => Err(self.mismatch("boolean")),
		}
	}

	pub fn big_number_value(&self) -> Result<&[u8], AccessError> {
		match self {
			RespValue::BigNumber(n) => Ok(&n[..]),
			_ => Err(self.mismatch("big number")),
		}
	}

	pub fn map_value(&self) -> Result<&BTreeMap<RespValue, RespValue>, AccessError> {
		match self {
			RespValue::Map(m) => Ok(m),
			_ => Err(self.mismatch("map")),
		}
	}

	pub fn set_value(&self) -> Result<&BTreeSet<RespValue>, AccessError> {
		match self {
			RespValue::Set(s) => Ok(s),
			_ => Err(self.mismatch("set")),
		}
	}

	pub fn attribute_value(&self) -> Result<&BTreeMap<RespValue, RespValue>, AccessError> {
		match self {
			RespValue::Attribute(a) => Ok(a),
			_ => Err(self.mismatch("attribute")),
		}
	}

	// Convenience constructors

	/// Create a simple string value
	pub fn simple_string(s: impl Into<String>) -> Self {
		RespValue::SimpleString(s.into())
	}

	/// Create an error string value
	pub fn error(e: impl Into<String>) -> Self {
		RespValue::ErrorString(e.into())
	}

	/// Create a blob string value
	pub fn blob_string(s: impl Into<Bytes>) -> Self {
		RespValue::BlobString(s.into())
	}

	/// Create a blob error value
	pub fn blob_error(e: impl Into<Bytes>) -> Self {
		RespValue::BlobError(e.into())
	}

	/// Create a verbatim string value, e.g. `verbatim(*b"txt", "hello")`
	pub fn verbatim(format: [u8; 3], data: impl Into<Bytes>) -> Self {
		RespValue::VerbatimString {
			format,
			data: data.into(),
		}
	}

	/// Create a big number value from its decimal digits
	pub fn big_number(digits: impl Into<Bytes>) -> Self {
		RespValue::BigNumber(digits.into())
	}

	/// Create an integer value
	pub fn integer(i: i64) -> Self {
		RespValue::Integer(i)
	}

	/// Create an array value from an iterator
	pub fn array(items: impl IntoIterator<Item = RespValue>) -> Self {
		RespValue::Array(items.into_iter().collect())
	}

	/// Create a map value from key/value pairs; later keys replace earlier ones
	pub fn map(pairs: impl IntoIterator<Item = (RespValue, RespValue)>) -> Self {
		RespValue::Map(pairs.into_iter().collect())
	}

	/// Create a set value from an iterator
	pub fn set(items: impl IntoIterator<Item = RespValue>) -> Self {
		RespValue::Set(items.into_iter().collect())
	}

	/// Create an attribute value from key/value pairs
	pub fn attribute(pairs: impl IntoIterator<Item = (RespValue, RespValue)>) -> Self {
		RespValue::Attribute(pairs.into_iter().collect())
	}

	/// Create a push notification value
	pub fn pubsub(kind: PubsubKind, channel: impl Into<String>, value: RespValue) -> Self {
		RespValue::Pubsub(Pubsub {
			kind,
			channel: channel.into(),
			value: Box::new(value),
		})
	}

	/// Create a RESP3 null value
	pub fn null() -> Self {
		RespValue::Null
	}
}

// The wire has a single `nan`, so every NaN payload compares as one value.
fn canonical_nan(d: f64) -> f64 {
	if d.is_nan() { f64::NAN } else { d }
}

impl Ord for RespValue {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::SimpleString(a), Self::SimpleString(b))
			| (Self::ErrorString(a), Self::ErrorString(b)) => a.cmp(b),
			(Self::Integer(a), Self::Integer(b)) => a.cmp(b),
			(Self::BlobString(a), Self::BlobString(b))
			| (Self::BlobError(a), Self::BlobError(b))
			| (Self::BigNumber(a), Self::BigNumber(b)) => a.cmp(b),
			(Self::Double(a), Self::Double(b)) => canonical_nan(*a).total_cmp(&canonical_nan(*b)),
			(Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
			(
				Self::VerbatimString { format: fa, data: da },
				Self::VerbatimString { format: fb, data: db },
			) => fa.cmp(fb).then_with(|| da.cmp(db)),
			(Self::Array(a), Self::Array(b)) => a.cmp(b),
			(Self::Map(a), Self::Map(b)) | (Self::Attribute(a), Self::Attribute(b)) => a.cmp(b),
			(Self::Set(a), Self::Set(b)) => a.cmp(b),
			(Self::Pubsub(a), Self::Pubsub(b)) => a.cmp(b),
			// Payload-free variants of equal rank, or different variants.
			_ => self.rank().cmp(&other.rank()),
		}
	}
}

impl PartialOrd for RespValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for RespValue {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for RespValue {}

// Consistent with `Ord`: doubles are equal exactly when their bits are.
impl Hash for RespValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.rank().hash(state);
		match self {
			RespValue::SimpleString(s) | RespValue::ErrorString(s) => s.hash(state),
			RespValue::Integer(i) => i.hash(state),
			RespValue::BlobString(b) | RespValue::BlobError(b) | RespValue::BigNumber(b) => {
				b.hash(state)
			}
			RespValue::Double(d) => canonical_nan(*d).to_bits().hash(state),
			RespValue::Boolean(b) => b.hash(state),
			RespValue::VerbatimString { format, data } => {
				format.hash(state);
				data.hash(state);
			}
			RespValue::Array(a) => a.hash(state),
			RespValue::Map(m) | RespValue::Attribute(m) => m.hash(state),
			RespValue::Set(s) => s.hash(state),
			RespValue::Pubsub(p) => p.hash(state),
			RespValue::NullBulkString | RespValue::NullArray | RespValue::Null => {}
		}
	}
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &BTreeMap<RespValue, RespValue>) -> fmt::Result {
	for (i, (key, value)) in pairs.iter().enumerate() {
		if i > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{key}: {value}")?;
	}
	Ok(())
}

fn write_items<'a>(
	f: &mut fmt::Formatter<'_>,
	items: impl IntoIterator<Item = &'a RespValue>,
) -> fmt::Result {
	for (i, item) in items.into_iter().enumerate() {
		if i > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{item}")?;
	}
	Ok(())
}

impl fmt::Display for RespValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RespValue::SimpleString(s) | RespValue::ErrorString(s) => f.write_str(s),
			RespValue::Integer(i) => write!(f, "{i}"),
			RespValue::BlobString(b) | RespValue::BlobError(b) => {
				f.write_str(&String::from_utf8_lossy(b))
			}
			RespValue::VerbatimString { data, .. } => f.write_str(&String::from_utf8_lossy(data)),
			RespValue::BigNumber(n) => write!(f, "({})", String::from_utf8_lossy(n)),
			RespValue::NullBulkString => f.write_str("<nil-string>"),
			RespValue::NullArray => f.write_str("<nil-array>"),
			RespValue::Null => f.write_str("<null>"),
			RespValue::Double(d) => f.write_str(&crate::utils::format_double(*d)),
			RespValue::Boolean(b) => write!(f, "{b}"),
			RespValue::Array(a) => {
				f.write_str("[")?;
				write_items(f, a)?;
				f.write_str("]")
			}
			RespValue::Set(s) => {
				f.write_str("~{")?;
				write_items(f, s)?;
				f.write_str("}")
			}
			RespValue::Map(m) => {
				f.write_str("{")?;
				write_pairs(f, m)?;
				f.write_str("}")
			}
			RespValue::Attribute(m) => {
				f.write_str("|{")?;
				write_pairs(f, m)?;
				f.write_str("}")
			}
			RespValue::Pubsub(p) => write!(f, "pubsub({} {}: {})", p.kind, p.channel, p.value),
		}
	}
}

// Convenient From implementations
impl From<&str> for RespValue {
	fn from(s: &str) -> Self {
		RespValue::BlobString(Bytes::copy_from_slice(s.as_bytes()))
	}
}

impl From<String> for RespValue {
	fn from(s: String) -> Self {
		RespValue::BlobString(Bytes::from(s))
	}
}

impl From<&[u8]> for RespValue {
	fn from(b: &[u8]) -> Self {
		RespValue::BlobString(Bytes::copy_from_slice(b))
	}
}

impl From<Vec<u8>> for RespValue {
	fn from(v: Vec<u8>) -> Self {
		RespValue::BlobString(Bytes::from(v))
	}
}

impl From<Bytes> for RespValue {
	fn from(b: Bytes) -> Self {
		RespValue::BlobString(b)
	}
}

impl From<i64> for RespValue {
	fn from(i: i64) -> Self {
		RespValue::Integer(i)
	}
}

impl From<i32> for RespValue {
	fn from(i: i32) -> Self {
		RespValue::Integer(i64::from(i))
	}
}

impl From<bool> for RespValue {
	fn from(b: bool) -> Self {
		RespValue::Boolean(b)
	}
}

impl From<f64> for RespValue {
	fn from(d: f64) -> Self {
		RespValue::Double(d)
	}
}

impl From<Pubsub> for RespValue {
	fn from(p: Pubsub) -> Self {
		RespValue::Pubsub(p)
	}
}

impl<T: Into<RespValue>> From<Vec<T>> for RespValue {
	fn from(v: Vec<T>) -> Self {
		RespValue::Array(v.into_iter().map(|x| x.into()).collect())
	}
}

impl<T: Into<RespValue>> From<Option<T>> for RespValue {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => RespValue::Null,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::hash_map::DefaultHasher;

	use rstest::rstest;

	use super::*;

	fn hash_of(value: &RespValue) -> u64 {
		let mut hasher = DefaultHasher::new();
		value.hash(&mut hasher);
		hasher.finish()
	}

	#[test]
	fn test_is_error() {
		assert!(RespValue::error("ERR").is_error());
		assert!(RespValue::blob_error("ERR").is_error());
		assert!(!RespValue::simple_string("OK").is_error());
	}

	#[test]
	fn test_nulls_are_distinct() {
		assert_ne!(RespValue::Null, RespValue::NullBulkString);
		assert_ne!(RespValue::Null, RespValue::NullArray);
		assert_ne!(RespValue::NullBulkString, RespValue::NullArray);
		assert!(RespValue::Null.is_null());
		assert!(RespValue::NullBulkString.is_null());
		assert!(RespValue::NullArray.is_null());
	}

	#[test]
	fn test_simple_and_blob_strings_differ() {
		assert_ne!(RespValue::simple_string("a"), RespValue::blob_string("a"));
		assert_ne!(
			hash_of(&RespValue::simple_string("a")),
			hash_of(&RespValue::error("a"))
		);
	}

	#[test]
	fn test_deep_equality_and_hash() {
		let build = || {
			RespValue::map([(
				RespValue::array([RespValue::integer(1), RespValue::Double(2.5)]),
				RespValue::set([RespValue::simple_string("x"), RespValue::Null]),
			)])
		};
		assert_eq!(build(), build());
		assert_eq!(hash_of(&build()), hash_of(&build()));
	}

	#[test]
	fn test_map_equality_ignores_insertion_order() {
		let a = RespValue::map([
			(RespValue::simple_string("k1"), RespValue::integer(1)),
			(RespValue::simple_string("k2"), RespValue::integer(2)),
		]);
		let b = RespValue::map([
			(RespValue::simple_string("k2"), RespValue::integer(2)),
			(RespValue::simple_string("k1"), RespValue::integer(1)),
		]);
		assert_eq!(a, b);
		assert_eq!(hash_of(&a), hash_of(&b));
	}

	#[test]
	fn test_map_and_attribute_differ() {
		let pairs = || [(RespValue::simple_string("k"), RespValue::integer(1))];
		assert_ne!(RespValue::map(pairs()), RespValue::attribute(pairs()));
	}

	#[test]
	fn test_double_equality() {
		assert_eq!(RespValue::Double(f64::NAN), RespValue::Double(f64::NAN));
		assert_eq!(
			hash_of(&RespValue::Double(f64::NAN)),
			hash_of(&RespValue::Double(f64::NAN))
		);
		assert_ne!(RespValue::Double(0.0), RespValue::Double(-0.0));
		assert_ne!(RespValue::Double(f64::NAN), RespValue::Double(f64::INFINITY));
	}

	#[rstest]
	#[case(-f64::NAN)]
	#[case(f64::from_bits(0x7ff8_0000_0000_0001))]
	#[case(f64::from_bits(0xfff8_0000_0000_0000))]
	fn test_every_nan_is_one_value(#[case] nan: f64) {
		assert!(nan.is_nan());
		assert_eq!(RespValue::Double(nan), RespValue::Double(f64::NAN));
		assert_eq!(
			RespValue::Double(nan).cmp(&RespValue::Double(f64::NAN)),
			Ordering::Equal
		);
		assert_eq!(
			hash_of(&RespValue::Double(nan)),
			hash_of(&RespValue::Double(f64::NAN))
		);
	}

	#[test]
	fn test_aggregates_as_set_members() {
		let set = RespValue::set([
			RespValue::array([RespValue::integer(1)]),
			RespValue::array([RespValue::integer(1)]),
			RespValue::array([RespValue::integer(2)]),
		]);
		assert_eq!(set.set_value().unwrap().len(), 2);
	}

	#[test]
	fn test_integer_value() {
		assert_eq!(RespValue::integer(42).integer_value(), Ok(42));
		assert_eq!(
			RespValue::simple_string("42").integer_value(),
			Err(AccessError::TypeMismatch {
				expected: "integer",
				found: "simple string",
			})
		);
	}

	#[rstest]
	#[case(RespValue::simple_string("hello"), "hello")]
	#[case(RespValue::error("ERR oops"), "ERR oops")]
	#[case(RespValue::blob_string("hello"), "hello")]
	#[case(RespValue::blob_error("SYNTAX bad"), "SYNTAX bad")]
	#[case(RespValue::verbatim(*b"txt", "Some string"), "Some string")]
	fn test_string_value(#[case] value: RespValue, #[case] expected: &str) {
		assert_eq!(value.string_value().unwrap(), expected);
	}

	#[test]
	fn test_string_value_invalid_utf8() {
		let value = RespValue::blob_string(vec![0xff, 0xfe]);
		assert!(matches!(
			value.string_value(),
			Err(AccessError::StringDecoding(_))
		));
		assert_eq!(value.bytes_value().unwrap(), &[0xffu8, 0xfe][..]);
	}

	#[test]
	fn test_string_value_mismatch() {
		assert!(matches!(
			RespValue::integer(1).string_value(),
			Err(AccessError::TypeMismatch { .. })
		));
	}

	#[test]
	fn test_array_value() {
		let arr = RespValue::array([RespValue::integer(1), RespValue::integer(2)]);
		assert_eq!(arr.array_value().unwrap().len(), 2);
		assert_eq!(arr.into_array().unwrap().len(), 2);
		assert!(RespValue::NullArray.array_value().is_err());
		assert!(RespValue::Null.into_array().is_err());
	}

	#[test]
	fn test_pubsub_value() {
		let value = RespValue::pubsub(PubsubKind::Message, "ch", RespValue::simple_string("hi"));
		let pubsub = value.pubsub_value().unwrap();
		assert_eq!(pubsub.kind, PubsubKind::Message);
		assert_eq!(pubsub.channel, "ch");
		assert_eq!(*pubsub.value, RespValue::simple_string("hi"));
		assert!(RespValue::Null.pubsub_value().is_err());
	}

	#[test]
	fn test_scalar_accessors() {
		assert_eq!(RespValue::Double(1.5).double_value(), Ok(1.5));
		assert_eq!(RespValue::Boolean(true).bool_value(), Ok(true));
		assert_eq!(
			RespValue::big_number("123456789012345678901234567890")
				.big_number_value()
				.unwrap(),
			b"123456789012345678901234567890"
		);
		assert!(RespValue::integer(1).double_value().is_err());
		assert!(RespValue::map([]).map_value().unwrap().is_empty());
		assert!(RespValue::attribute([]).attribute_value().unwrap().is_empty());
		assert!(RespValue::map([]).attribute_value().is_err());
	}

	#[test]
	fn test_pubsub_kind_from_bytes() {
		assert_eq!(PubsubKind::from_bytes(b"message"), Ok(PubsubKind::Message));
		assert_eq!(PubsubKind::from_bytes(b"subscribe"), Ok(PubsubKind::Subscribe));
		assert_eq!(
			PubsubKind::from_bytes(b"unsubscribe"),
			Ok(PubsubKind::Unsubscribe)
		);
		assert_eq!(
			PubsubKind::from_bytes(b"MESSAGE"),
			Err(DecodeError::UnknownPubsubKind("MESSAGE".to_string()))
		);
	}

	#[test]
	fn test_from_conversions() {
		let s: RespValue = "test".into();
		assert_eq!(s, RespValue::blob_string("test"));

		let i: RespValue = 42i64.into();
		assert_eq!(i.integer_value(), Ok(42));

		let b: RespValue = true.into();
		assert_eq!(b.bool_value(), Ok(true));

		let none: RespValue = Option::<i64>::None.into();
		assert_eq!(none, RespValue::Null);

		let cmd: RespValue = vec!["GET", "key"].into();
		assert_eq!(
			cmd,
			RespValue::array([RespValue::blob_string("GET"), RespValue::blob_string("key")])
		);
	}

	#[rstest]
	#[case(RespValue::simple_string("OK"), "OK")]
	#[case(RespValue::integer(-7), "-7")]
	#[case(RespValue::NullBulkString, "<nil-string>")]
	#[case(RespValue::NullArray, "<nil-array>")]
	#[case(RespValue::Null, "<null>")]
	#[case(RespValue::Double(f64::NEG_INFINITY), "-inf")]
	#[case(RespValue::array([RespValue::blob_string("a"), RespValue::integer(1)]), "[a, 1]")]
	#[case(RespValue::map([(RespValue::simple_string("k"), RespValue::Boolean(false))]), "{k: false}")]
	#[case(RespValue::set([RespValue::integer(2), RespValue::integer(1)]), "~{1, 2}")]
	#[case(RespValue::pubsub(PubsubKind::Message, "ch", RespValue::simple_string("hi")), "pubsub(message ch: hi)")]
	fn test_display(#[case] value: RespValue, #[case] expected: &str) {
		assert_eq!(value.to_string(), expected);
	}
}
