// Adapters layer: concrete reply channels for the chat platform and the terminal.

pub mod console;
pub mod discord;
pub mod memory;
