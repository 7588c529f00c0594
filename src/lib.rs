//! CPU, memory and process statistics derived from the Linux /proc filesystem.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod manager;
pub mod parser;
pub mod process;
pub mod processor;
pub mod source;
pub mod system;
pub mod user;

pub use manager::Manager;
pub use process::{Process, ProcessSnapshot};
pub use processor::{CpuTicks, Processor};
pub use source::ProcSource;
pub use system::SystemSnapshot;
