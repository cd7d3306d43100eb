pub mod bvalue;
pub mod camino;
pub mod error;
pub mod scheme;
pub mod shell;
