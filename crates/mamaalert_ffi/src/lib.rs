//! Flutter-facing bindings for MamaAlert core.

pub mod api;
