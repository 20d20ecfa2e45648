// Domain layer: fact relations, result records and ports. No I/O here.

pub mod model;
pub mod ports;
