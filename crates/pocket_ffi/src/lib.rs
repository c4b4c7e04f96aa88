//! Flutter-facing bindings over `pocket_core`.

pub mod api;
