// Server module entry point
// Provides listener creation, the accept loop, and graceful shutdown

pub mod connection;
pub mod listener;
pub mod shutdown;

// Rust does not allow `loop` as a module name (keyword), use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use shutdown::{start_signal_handler, Shutdown};
