//! Feeds a fragmented RESP3 stream through `RespDecoder`.
//!
//! Run with `RUST_LOG=trace` to see the decoder suspend between reads.

use std::time::Duration;

use bytes::BytesMut;
use resp_codec::PubsubKind;
use resp_codec::RespDecoder;
use resp_codec::RespEncoder;
use resp_codec::RespValue;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

// Small on purpose so frames straddle reads.
const READ_SIZE: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let replies = vec![
		RespValue::simple_string("OK"),
		RespValue::Integer(1000),
		vec!["SET", "key", "value"].into(),
		RespValue::map([
			(RespValue::simple_string("proto"), RespValue::Integer(3)),
			(RespValue::simple_string("modules"), RespValue::set([])),
		]),
		RespValue::pubsub(PubsubKind::Message, "news", RespValue::blob_string("hello")),
		RespValue::NullBulkString,
	];
	let mut wire = BytesMut::new();
	for reply in &replies {
		reply.encode_to(&mut wire)?;
	}

	let (mut client, mut server) = tokio::io::duplex(64);
	let writer = tokio::spawn(async move {
		for chunk in wire.chunks(7) {
			server.write_all(chunk).await?;
			tokio::time::sleep(Duration::from_millis(1)).await;
		}
		server.shutdown().await
	});

	let mut decoder = RespDecoder::new();
	let mut buf = [0u8; READ_SIZE];
	loop {
		let n = client.read(&mut buf).await?;
		if n == 0 {
			break;
		}
		let (values, consumed) = decoder.feed(&buf[..n])?;
		for value in values {
			println!("[decoder] {} ({})", value, value.type_name());
		}
		if consumed > 0 {
			log::info!("{} bytes decoded, {} buffered", consumed, decoder.buffered());
		}
	}
	writer.await??;

	if !decoder.is_idle() {
		log::warn!("stream ended inside a frame");
	}
	Ok(())
}
