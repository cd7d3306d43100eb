use thiserror::Error;
use crate::scheme::SchemeFormat;

#[derive(Debug,Error)]
pub enum SchemeError {
    #[error("unable to open scheme file: {0}")]
    FileLoad(#[from] num_table::TableError),
    #[error("unrecognized scheme format: {0} columns")]
    UnrecognizedFormat(usize),
    #[error("no conversion from the {0} format to a Stejskal-Tanner description")]
    UnsupportedConversion(SchemeFormat),
    #[error("the {0} format has no Camino scheme-file representation")]
    UnsupportedSerialization(SchemeFormat),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
