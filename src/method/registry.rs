//! Method table for dispatching calls by hash.
//!
//! Methods register under the FNV-1a hash of their name; the name itself
//! never travels on the wire and is not consulted at resolve time. Two
//! different names that hash alike would be indistinguishable to a peer, so
//! registration rejects a hash that is already taken instead of letting one
//! method silently shadow the other.
//!
//! The table is meant to be built once, then shared read-only across
//! connections (`Arc<MethodTable>`), so lookups need no locking.

use std::collections::HashMap;

use crate::codec::{Tag, Value};
use crate::error::{Error, Result};
use crate::hash::method_hash;
use crate::method::{FormatHandler, Handler, HandlerResult, RawHandler};
use crate::queue::CallQueue;

/// One registered method: name, wire hash, handler.
///
/// Created at registration time, immutable thereafter.
pub struct MethodDescriptor {
    name: String,
    hash: u64,
    handler: Box<dyn Handler>,
}

impl MethodDescriptor {
    /// The method's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method's wire hash.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Invoke the handler with a raw payload.
    pub fn call(&self, payload: &[u8], replies: &mut CallQueue) -> HandlerResult {
        self.handler.call(payload, replies)
    }
}

impl std::fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}

/// Registry mapping method hashes to handlers.
#[derive(Debug, Default)]
pub struct MethodTable {
    methods: HashMap<u64, MethodDescriptor>,
}

impl MethodTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method under the hash of `name`.
    ///
    /// Fails with [`Error::DuplicateMethod`] if the hash is already taken,
    /// either by the same name or by a different name that collides.
    pub fn register<H: Handler>(&mut self, name: &str, handler: H) -> Result<()> {
        let hash = method_hash(name);
        if let Some(existing) = self.methods.get(&hash) {
            return Err(Error::DuplicateMethod {
                name: name.to_owned(),
                existing: existing.name.clone(),
            });
        }
        self.methods.insert(
            hash,
            MethodDescriptor {
                name: name.to_owned(),
                hash,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Register a closure that takes the payload bytes as-is.
    ///
    /// Sugar for [`register`](Self::register) with a [`RawHandler`].
    pub fn register_fn<F>(&mut self, name: &str, handler: F) -> Result<()>
    where
        F: Fn(&[u8], &mut CallQueue) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(name, RawHandler::new(handler))
    }

    /// Register a method whose payload is pre-decoded against `descriptor`.
    ///
    /// Sugar for [`register`](Self::register) with a [`FormatHandler`].
    pub fn register_fmt<F>(&mut self, name: &str, descriptor: &[Tag], handler: F) -> Result<()>
    where
        F: Fn(&[Value], &mut CallQueue) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(name, FormatHandler::new(descriptor.to_vec(), handler))
    }

    /// Look up a method by its wire hash.
    pub fn resolve(&self, hash: u64) -> Option<&MethodDescriptor> {
        self.methods.get(&hash)
    }

    /// Look up a method by name, via its hash.
    pub fn resolve_by_name(&self, name: &str) -> Option<&MethodDescriptor> {
        self.resolve(method_hash(name))
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the table has no methods.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_payload: &[u8], _replies: &mut CallQueue) -> HandlerResult {
        Ok(())
    }

    #[test]
    fn test_register_and_resolve() {
        let mut table = MethodTable::new();
        table.register_fn("Echo", noop).unwrap();

        let method = table.resolve(method_hash("Echo")).unwrap();
        assert_eq!(method.name(), "Echo");
        assert_eq!(method.hash(), method_hash("Echo"));
    }

    #[test]
    fn test_resolve_by_name() {
        let mut table = MethodTable::new();
        table.register_fn("Say_IntString", noop).unwrap();

        assert!(table.resolve_by_name("Say_IntString").is_some());
        assert!(table.resolve_by_name("say_intstring").is_none());
    }

    #[test]
    fn test_resolve_miss() {
        let table = MethodTable::new();
        assert!(table.resolve(0x1234).is_none());
        assert!(table.resolve_by_name("nothing").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut table = MethodTable::new();
        table.register_fn("Echo", noop).unwrap();

        let err = table.register_fn("Echo", noop).unwrap_err();
        match err {
            Error::DuplicateMethod { name, existing } => {
                assert_eq!(name, "Echo");
                assert_eq!(existing, "Echo");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_registration_order_irrelevant() {
        let mut forward = MethodTable::new();
        forward.register_fn("A", noop).unwrap();
        forward.register_fn("B", noop).unwrap();

        let mut backward = MethodTable::new();
        backward.register_fn("B", noop).unwrap();
        backward.register_fn("A", noop).unwrap();

        for table in [&forward, &backward] {
            assert!(table.resolve_by_name("A").is_some());
            assert!(table.resolve_by_name("B").is_some());
        }
    }

    #[test]
    fn test_register_fmt_dispatches_decoded_args() {
        use crate::codec;

        let mut table = MethodTable::new();
        table
            .register_fmt("Sum", &[Tag::Int32, Tag::Int32], |args, _replies| {
                let a = args[0].as_i32().unwrap();
                let b = args[1].as_i32().unwrap();
                assert_eq!(a + b, 7);
                Ok(())
            })
            .unwrap();

        let payload = codec::encode(
            &[Tag::Int32, Tag::Int32],
            &[Value::Int32(3), Value::Int32(4)],
        )
        .unwrap();

        let mut queue = CallQueue::new();
        table
            .resolve_by_name("Sum")
            .unwrap()
            .call(&payload, &mut queue)
            .unwrap();
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MethodTable>();
    }
}
