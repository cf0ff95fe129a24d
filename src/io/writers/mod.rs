pub mod go;
pub mod json;

pub use go::GoWriter;
pub use json::JsonWriter;
