//! Pair-returning operations behind the HTTP routes.
//!
//! Every call resolves both consumers afresh from the given request scope and
//! reads the same accessor from each, so the pair can be compared directly.

use crate::services::{Consumer, PrimaryConsumer, SecondaryConsumer};
use crate::{DiResult, Resolver, Scope};

/// Ids as seen by the primary and the secondary consumer, in that order.
pub type IdPair = [String; 2];

fn pair_of(scope: &Scope, read: fn(&Consumer) -> &str) -> DiResult<IdPair> {
    let primary = scope.get::<PrimaryConsumer>()?;
    let secondary = scope.get::<SecondaryConsumer>()?;
    Ok([read(&primary).to_owned(), read(&secondary).to_owned()])
}

/// Both entries are equal, and equal across calls.
pub fn singleton_pair(scope: &Scope) -> DiResult<IdPair> {
    pair_of(scope, Consumer::singleton_id)
}

/// Both entries are equal within one scope and differ between scopes.
pub fn request_pair(scope: &Scope) -> DiResult<IdPair> {
    pair_of(scope, Consumer::request_id)
}

/// The entries differ from each other and from every earlier call.
pub fn transient_pair(scope: &Scope) -> DiResult<IdPair> {
    pair_of(scope, Consumer::transient_id)
}
