//! Language adapters backing the type database.

pub mod go;
