pub mod interface;
mod receiver;
mod sender;

pub use interface::{TransportError, TransportInterface, TransportResult, TransportStream};
pub use receiver::TransportReceiver;
pub use sender::TransportSender;
