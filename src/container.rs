//! Wiring of the probe services into a container.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::identifier::IdentifierSource;
use crate::services::{
    Consumer, OperationId, OperationService, PrimaryConsumer, RequestOperation, SecondaryConsumer,
    SingletonOperation, TransientOperation,
};
use crate::{DiResult, Lifetime, Resolver, ServiceCollection, ServiceProvider};

/// Registers an operation service under its own lifetime, drawing its id
/// from the registered `dyn IdentifierSource`.
pub fn add_operation<T: OperationService>(services: &mut ServiceCollection) -> &mut ServiceCollection {
    services.add_try_factory::<T, _>(T::LIFETIME, |r| {
        let source = r.get_trait::<dyn IdentifierSource>()?;
        OperationId::generate(source.as_ref(), T::NAME).map(T::from_id)
    })
}

/// Declares every probe service.
///
/// `consumer_lifetime` applies to both consumers. A `Singleton` consumer
/// fails to resolve because it would capture a request-scoped operation.
pub fn configure_services(
    services: &mut ServiceCollection,
    source: Arc<dyn IdentifierSource>,
    consumer_lifetime: Lifetime,
) -> &mut ServiceCollection {
    services.add_singleton_trait::<dyn IdentifierSource>(source);

    add_operation::<SingletonOperation>(services);
    add_operation::<RequestOperation>(services);
    add_operation::<TransientOperation>(services);

    services.add_try_factory::<PrimaryConsumer, _>(consumer_lifetime, |r| {
        Consumer::resolve(r).map(PrimaryConsumer::new)
    });
    services.add_try_factory::<SecondaryConsumer, _>(consumer_lifetime, |r| {
        Consumer::resolve(r).map(SecondaryConsumer::new)
    });

    services.prewarm::<SingletonOperation>()
}

/// Builds a lazily initialized container around `source`.
pub fn build_with_source(source: Arc<dyn IdentifierSource>, consumer_lifetime: Lifetime) -> ServiceProvider {
    let mut services = ServiceCollection::new();
    configure_services(&mut services, source, consumer_lifetime);
    services.build()
}

/// Builds the container described by `config`, prewarming singletons when
/// `eager_singletons` is set.
pub fn build_container(config: &ServerConfig) -> DiResult<ServiceProvider> {
    let provider = build_with_source(config.id_source.build(), config.consumer_lifetime);
    if config.eager_singletons {
        provider.prewarm()?;
    }
    Ok(provider)
}
