//! Purpose: Define the stable public Rust API boundary for routedec.
//! Exports: Decode pipeline entry points, the value model, and error types.
//! Role: Public, additive-only surface; hides pipeline stage internals.
//! Invariants: This module is the only public path callers should depend on.
//! Invariants: Stage modules stay reachable through `core` for tests only.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::decode::{
    decode_report, decode_route, DecodeFailure, DecodeMetadata, DecodeOutcome, DecodeReport,
    ROUTE_SENTINEL,
};
pub use crate::core::deserialize::deserialize_roots;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::value::Value;
