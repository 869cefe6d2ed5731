//! Request-scoped context values
//!
//! A [`Context`] is an immutable chain of typed values. Deriving a child with
//! [`Context::with_value`] never changes the parent, so a context can be
//! passed down a call chain and extended locally. The crate uses it to carry
//! a [`Logger`] without going through the process-wide default.

use super::logger::Logger;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Node {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// An empty context
    pub fn background() -> Self {
        Self::default()
    }

    /// A child context where `K` maps to `value`; the receiver is unchanged.
    ///
    /// `K` is only used as a key. Declaring a private marker type keeps other
    /// code from reading or shadowing the value.
    #[must_use]
    pub fn with_value<K: 'static, V: Any + Send + Sync>(&self, value: V) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// The nearest value stored under `K`, if it has type `V`
    pub fn value<K: 'static, V: Any + Send + Sync>(&self) -> Option<&V> {
        let key = TypeId::of::<K>();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == key {
                return current.value.downcast_ref::<V>();
            }
            node = current.parent.as_deref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            depth += 1;
            node = current.parent.as_deref();
        }
        f.debug_struct("Context").field("values", &depth).finish()
    }
}

struct LoggerKey;

/// A child of `parent` carrying `logger`
pub fn with_context(parent: &Context, logger: Logger) -> Context {
    parent.with_value::<LoggerKey, Logger>(logger)
}

/// The logger carried by `ctx`, or the process-wide default
pub fn from_context(ctx: &Context) -> Logger {
    ctx.value::<LoggerKey, Logger>()
        .cloned()
        .unwrap_or_else(crate::global::default)
}
