// Domain layer: mask kinds, diagnostics and the host-facing ports.
// No regex here; rule tables live in `core::rules`.

pub mod model;
pub mod ports;
