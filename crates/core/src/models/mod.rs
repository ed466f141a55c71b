pub mod entry;
pub mod quote;
pub mod snapshot;
pub mod stats;
