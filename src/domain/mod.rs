pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::*;
pub use errors::SinkError;
