mod engine;
mod history;
pub mod network;
mod peer;
mod state;

pub use engine::Engine;
pub use history::MessageStore;
pub use peer::PeerManager;
pub use state::AppState;
