// Security module for path containment
//
// File operations resolve every caller-supplied path against the configured
// workspace root and refuse anything that lands outside it.

pub mod path_validator;

pub use path_validator::{PathSecurityError, resolve_within_root};
