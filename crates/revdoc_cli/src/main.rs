//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `revdoc_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("revdoc_core ping={}", revdoc_core::ping());
    println!("revdoc_core version={}", revdoc_core::core_version());
}
