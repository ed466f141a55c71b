pub mod encryption;
pub mod format;
pub mod legacy;
pub mod manager;
pub mod remote;
pub mod traits;
