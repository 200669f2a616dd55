// Domain layer: build record models and the ports the comparison runs through.

pub mod model;
pub mod ports;
