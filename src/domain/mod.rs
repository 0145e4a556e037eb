// Domain layer: account models and the ports (capability traits) the core talks through.

pub mod model;
pub mod ports;
