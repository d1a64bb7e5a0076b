//! Shared `Result` alias for fallible seams that cross crate boundaries.
//!
//! Startup wiring (configuration, rules-document loading) returns this
//! alias with a domain context type, so rootcause's `Report` carries the
//! failing layer's error through `?`. Crates with a fixed caller-facing
//! contract, such as the session store and the auth backend, keep their
//! own plain error enums instead.

use rootcause::Report;

/// Result carrying a rootcause `Report` over a domain context type.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
