//! Generator and writer loops, and the wait for shutdown
//!
//! Both loops run until the shared state is stopped and are meant to be
//! spawned as tokio tasks.

mod generator;
mod shutdown;
mod writer;

pub use generator::Generator;
pub use shutdown::wait_for_shutdown;
pub use writer::{Writer, WriterStats};
