pub use board::*;
pub use cell::*;
pub use protocol::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cell;
mod protocol;
