// ABOUTME: Steamfolio application wiring shared by the binary
// ABOUTME: Service construction, logging setup, HTTP server and terminal output

pub mod context;
pub mod display;
pub mod logging;
pub mod server;

pub use context::AppContext;

#[cfg(test)]
mod tests;
