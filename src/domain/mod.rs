// Domain layer: core models and ports (interfaces). No I/O here; remote
// evaluation and rendering live behind the ports in `ports.rs`.

pub mod model;
pub mod ports;
