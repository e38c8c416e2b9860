//! # wardlink-auth
//!
//! Glue against the external credential collaborator. Tokens are minted
//! elsewhere; this crate verifies them and hands the workflow a trusted
//! `(account_id, role)` pair. The encoder exists for tooling and tests.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
pub use encoder::TokenEncoder;
