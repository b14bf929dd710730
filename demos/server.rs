//! Demo server - accepts clients and serves two methods.
//!
//! Exposes:
//! - `Say_IntString(int32, string, float32)` - prints its arguments and
//!   calls the client's `wazzap(string, float32)` back
//! - `CloseServer()` - asks the server to stop accepting clients
//!
//! Run the server, then run the demo client against it:
//!
//! ```text
//! cargo run --example server
//! cargo run --example client
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wirecall::codec::{Tag, Value};
use wirecall::transport::Listener;
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

    let closing = Arc::new(AtomicBool::new(false));

    let mut table = MethodTable::new();
    table.register_fmt(
        "Say_IntString",
        &[Tag::Int32, Tag::Str, Tag::Float32],
        |args, replies| {
            println!(
                "Say_IntString(): {}, '{}', {}",
                args[0].as_i32().unwrap_or_default(),
                args[1].as_str().unwrap_or_default(),
                args[2].as_f32().unwrap_or_default(),
            );
            replies.enqueue_call(
                "wazzap",
                &[Tag::Str, Tag::Float32],
                &[Value::from("TestString"), Value::Float32(0.15)],
            )
        },
    )?;
    let flag = Arc::clone(&closing);
    table.register_fmt("CloseServer", &[], move |_args, _replies| {
        println!("CloseServer(): got request to close the server");
        flag.store(true, Ordering::SeqCst);
        Ok(())
    })?;
    let table = Arc::new(table);

    let listener = Listener::bind(ADDR).await?;
    println!("Listening on {ADDR}, waiting for a client...");

    while !closing.load(Ordering::SeqCst) {
        let (stream, peer) = listener.accept().await?;
        println!("Accepted client {peer}");

        let mut conn = Connection::new(stream, Arc::clone(&table));
        loop {
            let status = conn.receive().await;
            if !status.is_ok() {
                tracing::info!(?status, "client loop ended");
                break;
            }
            // Send whatever the handler queued back to this client.
            if let Err(e) = conn.flush().await {
                tracing::warn!(error = %e, "reply flush failed");
                break;
            }
        }
    }

    println!("Stopping server...");
    Ok(())
}
