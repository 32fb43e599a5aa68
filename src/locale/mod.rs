//! Locale codes and the providers that list them.

mod bundled;
/// Locale code parsing and normalization.
pub mod code;
/// Locale list providers.
pub mod provider;
