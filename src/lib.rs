//! AMP CSS validator
//!
//! Re-exports the crates of the workspace so binaries and integration tests can use a single
//! dependency.
pub use ampcss_css3 as css3;
pub use ampcss_shared as shared;
pub use ampcss_validator as validator;
