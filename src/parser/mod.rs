//! Response linking module.

mod linker;
mod options;

pub use linker::TableLinker;
pub use options::{ErrorMode, IndexPolicy, LinkOptions};
