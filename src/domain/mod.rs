pub mod codec;

mod chan;
mod config;
mod event;
mod identity;
mod message;
mod peer;

pub use chan::BroadcastChannel;
pub use codec::CodecError;
pub use config::Config;
pub use event::EngineEvent;
pub use identity::Identity;
pub use message::Message;
pub use peer::PeerRecord;
