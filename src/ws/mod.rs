// WebSocket fan-out support

mod manager;

pub use manager::{ConnectionHandle, ConnectionRegistry};
