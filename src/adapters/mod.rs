// Adapters layer: host implementations of the domain ports.

pub mod memory;
