//! Service lifetime definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Service lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use scope_probe::{ServiceCollection, Resolver};
///
/// struct Database { url: String }
/// struct Repository { db_url: String }
/// struct RequestModel { id: u32 }
///
/// let mut services = ServiceCollection::new();
///
/// // Singleton: One instance for entire application
/// services.add_singleton(Database {
///     url: "postgres://localhost".to_string()
/// });
///
/// // Scoped: One instance per request/scope
/// services.add_scoped_factory::<Repository, _>(|r| {
///     let db = r.get_required::<Database>();
///     Repository { db_url: db.url.clone() }
/// });
///
/// // Transient: New instance every time
/// services.add_transient_factory::<RequestModel, _>(|_| RequestModel { id: 7 });
///
/// let provider = services.build();
///
/// let db1 = provider.get_required::<Database>();
/// let scope1 = provider.create_scope();
/// let db2 = scope1.get_required::<Database>();
/// assert!(std::ptr::eq(&*db1, &*db2));
///
/// let repo1a = scope1.get_required::<Repository>();
/// let repo1b = scope1.get_required::<Repository>();
/// assert!(std::ptr::eq(&*repo1a, &*repo1b));
///
/// let scope2 = provider.create_scope();
/// let repo2 = scope2.get_required::<Repository>();
/// assert!(!std::ptr::eq(&*repo1a, &*repo2));
///
/// let model1 = scope1.get_required::<RequestModel>();
/// let model2 = scope1.get_required::<RequestModel>();
/// assert!(!std::ptr::eq(&*model1, &*model2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// Single instance per root provider, cached forever
    ///
    /// Created on first request (or during prewarm) and shared across all
    /// scopes and threads.
    Singleton,
    /// Single instance per scope, cached for scope lifetime
    ///
    /// In the web server every inbound request gets its own scope, so this is
    /// the "request" lifetime.
    #[serde(alias = "request")]
    Scoped,
    /// New instance per resolution, never cached
    Transient,
}

impl Lifetime {
    /// Lowercase name, matching the configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Scoped => "scoped",
            Lifetime::Transient => "transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        lifetime: Lifetime,
    }

    #[test]
    fn test_request_alias_maps_to_scoped() {
        let holder: Holder = serde_json::from_str(r#"{"lifetime":"request"}"#).unwrap();
        assert_eq!(holder.lifetime, Lifetime::Scoped);

        let holder: Holder = serde_json::from_str(r#"{"lifetime":"scoped"}"#).unwrap();
        assert_eq!(holder.lifetime, Lifetime::Scoped);
    }

    #[test]
    fn test_display_matches_config_spelling() {
        assert_eq!(Lifetime::Singleton.to_string(), "singleton");
        assert_eq!(Lifetime::Scoped.to_string(), "scoped");
        assert_eq!(Lifetime::Transient.to_string(), "transient");
    }
}
