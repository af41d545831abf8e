//! Signaling relay that pairs a receiver and a sender under a shared room
//! code and forwards their WebRTC offer/answer/candidate frames.

mod app;
mod config;
mod registry;
mod relay;
mod signaling;

pub use app::*;
pub use config::*;
pub use registry::*;
pub use relay::*;
pub use signaling::*;
