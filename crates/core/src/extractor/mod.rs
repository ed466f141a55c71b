pub mod fetch;
pub mod strategies;
pub mod traits;
