// Domain layer: records, artifacts and the ports the shell is wired through.

pub mod model;
pub mod ports;
