mod config;
mod player_count;
mod server;
mod session;
pub use config::*;
pub use player_count::*;
pub use server::*;
pub use session::*;
