//! Repository modules implementing SQL operations on the durable backend.
//!
//! Each module adds methods to `ProctorDb` via `impl ProctorDb` blocks.

pub mod session;
