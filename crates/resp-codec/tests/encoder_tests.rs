//! Integration tests for RESP encoder

use bytes::Bytes;
use bytes::BytesMut;
use resp_codec::EncodeError;
use resp_codec::PubsubKind;
use resp_codec::RespEncoder;
use resp_codec::RespValue;
use rstest::rstest;

fn roundtrip(original: &RespValue) -> RespValue {
	let encoded = original.encode().unwrap();
	let mut buf = BytesMut::from(&encoded[..]);
	let decoded = resp_codec::parse(&mut buf).unwrap();
	assert!(buf.is_empty(), "Trailing bytes after {:?}", original);
	decoded
}

#[test]
fn test_encode_redis_ping() {
	let cmd = RespValue::array([RespValue::blob_string("PING")]);

	let encoded = cmd.encode().unwrap();
	assert_eq!(&encoded[..], b"*1\r\n$4\r\nPING\r\n");
}

#[test]
fn test_encode_redis_set() {
	let cmd: RespValue = vec!["SET", "key", "value"].into();

	let encoded = cmd.encode().unwrap();
	assert_eq!(
		&encoded[..],
		b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n"
	);
}

#[rstest]
#[case(RespValue::simple_string("OK"), b"+OK\r\n")]
#[case(RespValue::Integer(-42), b":-42\r\n")]
#[case(RespValue::array([RespValue::blob_string("a"), RespValue::Integer(1)]), b"*2\r\n$1\r\na\r\n:1\r\n")]
#[case(RespValue::NullBulkString, b"$-1\r\n")]
#[case(RespValue::NullArray, b"*-1\r\n")]
#[case(RespValue::Null, b"_\r\n")]
#[case(RespValue::pubsub(PubsubKind::Message, "ch", RespValue::simple_string("hi")), b">3\r\n+message\r\n$2\r\nch\r\n+hi\r\n")]
fn test_encode_exact_bytes(#[case] value: RespValue, #[case] expected: &[u8]) {
	assert_eq!(&resp_codec::encode(&value).unwrap()[..], expected);
}

#[rstest]
#[case(RespValue::simple_string("OK"))]
#[case(RespValue::error("ERR test error"))]
#[case(RespValue::Integer(42))]
#[case(RespValue::Integer(i64::MIN))]
#[case(RespValue::blob_string("hello world"))]
#[case(RespValue::NullBulkString)]
#[case(RespValue::NullArray)]
#[case(RespValue::Null)]
fn test_roundtrip_resp2_types(#[case] original: RespValue) {
	assert_eq!(roundtrip(&original), original);
}

#[rstest]
#[case(RespValue::Boolean(true))]
#[case(RespValue::Boolean(false))]
#[case(RespValue::Double(1.23456))]
#[case(RespValue::Double(-0.0))]
#[case(RespValue::Double(1e300))]
#[case(RespValue::Double(5e-324))]
#[case(RespValue::Double(f64::INFINITY))]
#[case(RespValue::Double(f64::NEG_INFINITY))]
#[case(RespValue::Double(f64::NAN))]
#[case(RespValue::Double(-f64::NAN))]
#[case(RespValue::big_number("123456789012345678901234567890"))]
#[case(RespValue::blob_error("SYNTAX invalid syntax"))]
#[case(RespValue::verbatim(*b"mkd", "# title"))]
fn test_roundtrip_resp3_types(#[case] original: RespValue) {
	assert_eq!(roundtrip(&original), original);
}

#[test]
fn test_roundtrip_computed_nan() {
	let zero = std::hint::black_box(0.0f64);
	let nan = zero / zero;
	assert!(nan.is_nan());

	let original = RespValue::Double(nan);
	assert_eq!(&original.encode().unwrap()[..], b",nan\r\n");
	assert_eq!(roundtrip(&original), original);

	let key = RespValue::map([(RespValue::Double(nan), RespValue::Integer(1))]);
	assert_eq!(roundtrip(&key), key);
}

#[test]
fn test_roundtrip_nested_aggregates() {
	let original = RespValue::array([
		RespValue::map([
			(
				RespValue::simple_string("members"),
				RespValue::set([RespValue::blob_string("a"), RespValue::blob_string("b")]),
			),
			(
				RespValue::array([RespValue::Integer(1), RespValue::Integer(2)]),
				RespValue::attribute([(RespValue::simple_string("ttl"), RespValue::Integer(60))]),
			),
		]),
		RespValue::pubsub(
			PubsubKind::Subscribe,
			"news",
			RespValue::array([RespValue::Double(0.5), RespValue::NullArray]),
		),
		RespValue::Array(vec![]),
		RespValue::map([]),
	]);

	assert_eq!(roundtrip(&original), original);
}

#[test]
fn test_encode_rejects_crlf_in_simple_string() {
	let value = RespValue::array([
		RespValue::Integer(1),
		RespValue::simple_string("two\r\nlines"),
	]);
	assert_eq!(
		value.encode(),
		Err(EncodeError::InvalidSimpleStringContent(
			"two\r\nlines".to_string()
		))
	);
}

#[test]
fn test_encode_empty_bulk_string() {
	let value = RespValue::BlobString(Bytes::new());
	let encoded = value.encode().unwrap();
	assert_eq!(&encoded[..], b"$0\r\n\r\n");
}

#[test]
fn test_encode_large_bulk_string() {
	let data = "x".repeat(1024);
	let value = RespValue::blob_string(data.clone());
	assert_eq!(roundtrip(&value).bytes_value().unwrap(), data.as_bytes());
}

#[test]
fn test_encode_binary_data() {
	let data: Vec<u8> = (0..=255).collect();
	let value = RespValue::blob_string(data.clone());
	assert_eq!(roundtrip(&value).bytes_value().unwrap(), &data[..]);
}
