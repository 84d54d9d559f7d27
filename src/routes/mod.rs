/// Router Module Index
///
/// Splits the HTTP surface by access level. The gate is applied to a whole module as a
/// route layer, so a handler cannot end up unprotected by being registered in the
/// wrong place.

/// Routes accessible without an API key (health, docs).
pub mod public;

/// Routes behind the API-key gate.
pub mod protected;
