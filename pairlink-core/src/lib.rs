//! Wire model shared by the pairlink relay and its clients.

mod model;

pub use model::*;
