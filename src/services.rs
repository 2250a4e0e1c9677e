//! Operation-id services and the consumers that depend on them.
//!
//! Each operation service draws one identifier from the [`IdentifierSource`]
//! when it is constructed and keeps it for life, so the identifier shows which
//! instance a caller received. The three types differ only in the lifetime
//! they are registered under.

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::identifier::IdentifierSource;
use crate::{DiError, DiResult, Lifetime, Resolver};

static CREATION_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identifier held by one operation-service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationId {
    value: String,
    sequence: u64,
}

impl OperationId {
    /// Draws a new identifier for `service`.
    pub fn generate(source: &dyn IdentifierSource, service: &'static str) -> DiResult<Self> {
        let value = source.generate().map_err(|e| DiError::factory(service, e))?;
        let sequence = CREATION_SEQUENCE.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(service, operation_id = %value, sequence, "operation instance created");
        Ok(Self { value, sequence })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Logical creation event: strictly increasing across the process.
    pub fn created_at(&self) -> u64 {
        self.sequence
    }
}

/// An operation-id service bound to a fixed lifetime.
pub trait OperationService: Send + Sync + Sized + 'static {
    const NAME: &'static str;
    const LIFETIME: Lifetime;

    fn from_id(id: OperationId) -> Self;

    fn id(&self) -> &OperationId;

    fn operation_id(&self) -> &str {
        self.id().value()
    }
}

/// One instance for the whole process.
#[derive(Debug)]
pub struct SingletonOperation(OperationId);

impl OperationService for SingletonOperation {
    const NAME: &'static str = "SingletonOperation";
    const LIFETIME: Lifetime = Lifetime::Singleton;

    fn from_id(id: OperationId) -> Self {
        Self(id)
    }

    fn id(&self) -> &OperationId {
        &self.0
    }
}

/// One instance per request scope.
#[derive(Debug)]
pub struct RequestOperation(OperationId);

impl OperationService for RequestOperation {
    const NAME: &'static str = "RequestOperation";
    const LIFETIME: Lifetime = Lifetime::Scoped;

    fn from_id(id: OperationId) -> Self {
        Self(id)
    }

    fn id(&self) -> &OperationId {
        &self.0
    }
}

/// A new instance on every resolution.
#[derive(Debug)]
pub struct TransientOperation(OperationId);

impl OperationService for TransientOperation {
    const NAME: &'static str = "TransientOperation";
    const LIFETIME: Lifetime = Lifetime::Transient;

    fn from_id(id: OperationId) -> Self {
        Self(id)
    }

    fn id(&self) -> &OperationId {
        &self.0
    }
}

/// Holds one resolved reference to each operation service.
///
/// References are resolved once, at construction, against whichever resolver
/// builds the consumer, and never re-resolved afterwards.
#[derive(Debug)]
pub struct Consumer {
    singleton: Arc<SingletonOperation>,
    request: Arc<RequestOperation>,
    transient: Arc<TransientOperation>,
}

impl Consumer {
    pub fn resolve<R: Resolver + ?Sized>(resolver: &R) -> DiResult<Self> {
        Ok(Self {
            singleton: resolver.get::<SingletonOperation>()?,
            request: resolver.get::<RequestOperation>()?,
            transient: resolver.get::<TransientOperation>()?,
        })
    }

    pub fn singleton_id(&self) -> &str {
        self.singleton.operation_id()
    }

    pub fn request_id(&self) -> &str {
        self.request.operation_id()
    }

    pub fn transient_id(&self) -> &str {
        self.transient.operation_id()
    }
}

/// First of the two symmetric consumers.
#[derive(Debug)]
pub struct PrimaryConsumer(Consumer);

impl PrimaryConsumer {
    pub fn new(inner: Consumer) -> Self {
        Self(inner)
    }
}

impl Deref for PrimaryConsumer {
    type Target = Consumer;

    fn deref(&self) -> &Consumer {
        &self.0
    }
}

/// Second of the two symmetric consumers.
#[derive(Debug)]
pub struct SecondaryConsumer(Consumer);

impl SecondaryConsumer {
    pub fn new(inner: Consumer) -> Self {
        Self(inner)
    }
}

impl Deref for SecondaryConsumer {
    type Target = Consumer;

    fn deref(&self) -> &Consumer {
        &self.0
    }
}
