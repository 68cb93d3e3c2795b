//! Adapters binding the court's ports to the shared bus.

pub mod bus_registry;

pub use bus_registry::BusSubmissionRegistry;
