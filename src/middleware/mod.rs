//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every request, independent of which
//! handler serves it. The router applies these around dispatch.
//!
//! - [`trace`]: per-request span with method, path, status and latency

pub mod trace;
