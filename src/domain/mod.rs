// Domain layer: core models and ports (interfaces). No external service calls.

pub mod model;
pub mod ports;
