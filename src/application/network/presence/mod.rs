pub mod interface;
mod service;

pub use interface::{Announcement, BeaconInterface};
pub use service::PresenceService;
