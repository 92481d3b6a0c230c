//! Code to human-readable text catalog
//!
//! Diagnostics carry a stable code plus a display message. The table here
//! is the message-lookup collaborator of the runtime: an opaque formatter
//! that hosts can swap reading material into without touching error types.

/// Stable diagnostic codes
pub mod codes {
    pub const DUPLICATE_COMPONENT: &str = "ARB-001";
    pub const UNRESOLVED_DEPENDENCY: &str = "ARB-002";
    pub const CYCLIC_DEPENDENCY: &str = "ARB-003";
    pub const NOT_FOUND: &str = "ARB-004";
    pub const CONFIGURATION_FAILED: &str = "ARB-005";
    pub const DESTRUCTION_FAILED: &str = "ARB-006";
    pub const CONFIGURATION: &str = "ARB-007";
    pub const COMPONENT: &str = "ARB-008";
}

/// Catalog of (code, text) pairs, one per diagnostic code
static MESSAGES: &[(&str, &str)] = &[
    (
        codes::DUPLICATE_COMPONENT,
        "two distinct components registered under the same name",
    ),
    (
        codes::UNRESOLVED_DEPENDENCY,
        "a declared dependency has no matching registered component",
    ),
    (
        codes::CYCLIC_DEPENDENCY,
        "the dependency graph contains a cycle",
    ),
    (codes::NOT_FOUND, "no instance registered under that name"),
    (
        codes::CONFIGURATION_FAILED,
        "a configure hook failed; the runtime did not reach the ready state",
    ),
    (
        codes::DESTRUCTION_FAILED,
        "a destroy hook failed; teardown continued best-effort",
    ),
    (codes::CONFIGURATION, "invalid runtime configuration"),
    (codes::COMPONENT, "a component raised an error"),
];

/// Look up the catalog text for a diagnostic code
pub fn message(code: &str) -> Option<&'static str> {
    MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, text)| *text)
}
