// Domain layer: boundary records, the promise handle and the ports the shell depends on.

pub mod model;
pub mod ports;
pub mod promise;
