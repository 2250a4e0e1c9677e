use scope_probe::{DiError, Resolver, ServiceCollection};
use std::sync::{Arc, Mutex};

#[test]
fn test_scoped_lifetime() {
    #[derive(Debug, Clone)]
    struct RequestContext {
        id: String,
    }

    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<RequestContext, _>(move |_| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        RequestContext {
            id: format!("req-{}", *c),
        }
    });

    let sp = sc.build();

    let scope1 = sp.create_scope();
    let scope2 = sp.create_scope();

    let ctx1a = scope1.get_required::<RequestContext>();
    let ctx1b = scope1.get_required::<RequestContext>();

    let ctx2a = scope2.get_required::<RequestContext>();
    let ctx2b = scope2.get_required::<RequestContext>();

    // Same instance within same scope
    assert!(Arc::ptr_eq(&ctx1a, &ctx1b));
    assert!(Arc::ptr_eq(&ctx2a, &ctx2b));

    // Different instances across scopes
    assert!(!Arc::ptr_eq(&ctx1a, &ctx2a));

    assert_eq!(ctx1a.id, "req-1");
    assert_eq!(ctx2a.id, "req-2");
}

#[test]
fn test_cannot_resolve_scoped_from_root() {
    struct ScopedService;

    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<ScopedService, _>(|_| ScopedService);

    let sp = sc.build();

    let result = sp.get::<ScopedService>();
    assert!(matches!(result, Err(DiError::WrongLifetime(_))));
}

#[test]
fn test_new_scope_never_sees_previous_instance() {
    struct Marker(u32);

    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<Marker, _>(move |_| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        Marker(*c)
    });

    let sp = sc.build();

    let first = {
        let scope = sp.create_scope();
        scope.get_required::<Marker>().0
    };
    let second = {
        let scope = sp.create_scope();
        scope.get_required::<Marker>().0
    };

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[test]
fn test_scope_ids_are_unique() {
    let sp = ServiceCollection::new().build();
    let a = sp.create_scope();
    let b = sp.create_scope();
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_scoped_with_singleton_dependency() {
    struct Database {
        connection: String,
    }

    struct Repository {
        db: Arc<Database>,
        scope_id: String,
    }

    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();

    sc.add_singleton(Database {
        connection: "postgres://localhost".to_string(),
    });

    sc.add_scoped_factory::<Repository, _>(move |r| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        Repository {
            db: r.get_required::<Database>(),
            scope_id: format!("scope-{}", *c),
        }
    });

    let sp = sc.build();

    let scope1 = sp.create_scope();
    let scope2 = sp.create_scope();

    let repo1 = scope1.get_required::<Repository>();
    let repo2 = scope2.get_required::<Repository>();

    assert!(!Arc::ptr_eq(&repo1, &repo2));
    assert_eq!(repo1.scope_id, "scope-1");
    assert_eq!(repo2.scope_id, "scope-2");

    // Same database instance (singleton)
    assert!(Arc::ptr_eq(&repo1.db, &repo2.db));
    assert_eq!(repo1.db.connection, "postgres://localhost");
}

#[test]
fn test_mixed_lifetimes_in_scope() {
    struct Singleton {
        value: String,
    }

    struct Scoped {
        singleton: Arc<Singleton>,
        id: String,
    }

    struct Transient {
        scoped: Arc<Scoped>,
        count: i32,
    }

    let scoped_counter = Arc::new(Mutex::new(0));
    let scoped_counter_clone = scoped_counter.clone();

    let transient_counter = Arc::new(Mutex::new(0));
    let transient_counter_clone = transient_counter.clone();

    let mut sc = ServiceCollection::new();

    sc.add_singleton(Singleton {
        value: "shared".to_string(),
    });

    sc.add_scoped_factory::<Scoped, _>(move |r| {
        let mut c = scoped_counter_clone.lock().unwrap();
        *c += 1;
        Scoped {
            singleton: r.get_required::<Singleton>(),
            id: format!("scoped-{}", *c),
        }
    });

    sc.add_transient_factory::<Transient, _>(move |r| {
        let mut c = transient_counter_clone.lock().unwrap();
        *c += 1;
        Transient {
            scoped: r.get_required::<Scoped>(),
            count: *c,
        }
    });

    let sp = sc.build();
    let scope = sp.create_scope();

    let t1 = scope.get_required::<Transient>();
    let t2 = scope.get_required::<Transient>();

    assert!(!Arc::ptr_eq(&t1, &t2));
    assert_eq!(t1.count, 1);
    assert_eq!(t2.count, 2);

    assert!(Arc::ptr_eq(&t1.scoped, &t2.scoped));
    assert_eq!(t1.scoped.id, "scoped-1");

    assert!(Arc::ptr_eq(&t1.scoped.singleton, &t2.scoped.singleton));
    assert_eq!(t1.scoped.singleton.value, "shared");
}

#[test]
fn test_transient_from_root_cannot_reach_scoped() {
    struct Scoped;
    struct NeedsScoped;

    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<Scoped, _>(|_| Scoped);
    sc.add_try_factory::<NeedsScoped, _>(scope_probe::Lifetime::Transient, |r| {
        r.get::<Scoped>()?;
        Ok(NeedsScoped)
    });

    let sp = sc.build();
    assert!(matches!(sp.get::<NeedsScoped>(), Err(DiError::WrongLifetime(_))));
    assert!(sp.create_scope().get::<NeedsScoped>().is_ok());
}
