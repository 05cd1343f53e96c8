// Domain layer: request/article models and the upstream port.

pub mod model;
pub mod ports;
