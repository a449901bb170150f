pub mod decoder;
mod engine;
mod host;

pub use decoder::{decode, DecodedValue};
pub use engine::run;
pub use host::{CompiledModule, Host};
