// Domain layer: contract models and the ports (clock, intake) the core depends on.

pub mod model;
pub mod ports;
