// Domain layer: Atlas wire types and the ports the client talks through.

pub mod model;
pub mod ports;
