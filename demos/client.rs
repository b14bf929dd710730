//! Demo client - calls the demo server and handles its callback.
//!
//! Calls the server's `Say_IntString(int32, string, float32)`, waits for the
//! server to call our `wazzap(string, float32)` back, then asks the server
//! to shut down with `CloseServer()`.
//!
//! Start the demo server first:
//!
//! ```text
//! cargo run --example server
//! cargo run --example client
//! ```

use std::sync::Arc;

use wirecall::codec::{Tag, Value};
use wirecall::transport::connect;
use wirecall::{Connection, MethodTable};

const ADDR: &str = "127.0.0.1:11223";

#[tokio::main]
async fn main() -> wirecall::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut table = MethodTable::new();
    table.register_fmt("wazzap", &[Tag::Str, Tag::Float32], |args, _replies| {
        println!(
            "wazzap(): '{}', {}",
            args[0].as_str().unwrap_or_default(),
            args[1].as_f32().unwrap_or_default(),
        );
        Ok(())
    })?;

    let stream = connect(ADDR).await?;
    let mut conn = Connection::new(stream, Arc::new(table));

    // Call the server's Say_IntString(int, string, float) method.
    conn.enqueue_call(
        "Say_IntString",
        &[Tag::Int32, Tag::Str, Tag::Float32],
        &[
            Value::Int32(23395),
            Value::from("gANGSTA!"),
            Value::Float32(4.20002),
        ],
    )?;
    conn.flush().await?;

    // Wait for the server to call our wazzap method back.
    let status = conn.receive().await;
    println!("receive: {status:?}");

    conn.enqueue_call("CloseServer", &[], &[])?;
    conn.flush().await?;

    println!("Closing client");
    Ok(())
}
