pub mod init;
pub mod kinds;
pub mod replay;

pub use init::{init, InitArgs};
pub use kinds::{kinds, KindsArgs};
pub use replay::{replay, ReplayArgs};
