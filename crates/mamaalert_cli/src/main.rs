//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mamaalert_core` linkage.
//! - Print a deterministic sample of derived storage keys.

use mamaalert_core::{key_for, ResourceKind};

const SAMPLE_OWNER: &str = "user-42";

fn main() {
    println!("mamaalert_core ping={}", mamaalert_core::ping());
    println!("mamaalert_core version={}", mamaalert_core::core_version());

    for kind in ResourceKind::ALL {
        match key_for(kind, Some(SAMPLE_OWNER)) {
            Ok(key) => println!("key kind={kind} value={key}"),
            Err(err) => println!("key kind={kind} error={err}"),
        }
    }
}
