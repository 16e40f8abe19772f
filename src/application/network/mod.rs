pub mod presence;
pub mod transport;
