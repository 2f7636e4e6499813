// Domain layer: request/result model and the unified adapter port.

pub mod model;
pub mod ports;
