use std::fs::File;
use std::io::Read;
use std::path::Path;
use log::debug;
use ndarray::Array2;
use regex::Regex;
use thiserror::Error;

// a line belongs to the numeric body if it starts with a plain decimal or
// scientific-notation number
const NUMERIC_LINE:&str = r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?";

#[derive(Debug,Error)]
pub enum TableError {
    #[error("cannot read table file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: cannot parse '{token}' as a number")]
    BadNumber{line:usize,token:String},
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow{line:usize,expected:usize,found:usize},
    #[error("no numeric data found in table file")]
    Empty,
    #[error("table shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub fn starts_numeric(line:&str) -> bool {
    let re = Regex::new(NUMERIC_LINE).expect("numeric line pattern is valid");
    re.is_match(line.trim_start())
}

/// Load a whitespace-delimited numeric table, skipping every leading line
/// that does not begin with a number (version headers, free-text comments).
/// Within the numeric body, blank lines are ignored and everything after a
/// '#' is treated as a comment.
pub fn load(table_path:&Path) -> Result<Array2<f64>,TableError> {
    let mut s = String::new();
    let mut f = File::open(table_path)?;
    f.read_to_string(&mut s)?;
    let table = parse(&s)?;
    debug!("loaded {} x {} table from {:?}",table.nrows(),table.ncols(),table_path);
    Ok(table)
}

pub fn parse(text:&str) -> Result<Array2<f64>,TableError> {
    let re = Regex::new(NUMERIC_LINE).expect("numeric line pattern is valid");

    let mut in_header = true;
    let mut skipped = 0;
    let mut flat = Vec::<f64>::new();
    let mut n_cols = 0;
    let mut n_rows = 0;

    for (line_no,line) in text.lines().enumerate() {
        if in_header {
            if !re.is_match(line.trim_start()) {
                skipped += 1;
                continue;
            }
            in_header = false;
        }
        // strip trailing comments once inside the numeric body
        let body = match line.find('#') {
            Some(index) => &line[..index],
            None => line
        };
        if body.trim().is_empty() {
            continue;
        }
        let mut row = Vec::<f64>::new();
        for token in body.split_whitespace() {
            let value:f64 = token.parse().map_err(|_| TableError::BadNumber {
                line:line_no + 1,
                token:token.to_string(),
            })?;
            row.push(value);
        }
        if n_rows == 0 {
            n_cols = row.len();
        } else if row.len() != n_cols {
            return Err(TableError::RaggedRow {
                line:line_no + 1,
                expected:n_cols,
                found:row.len(),
            });
        }
        flat.extend(row);
        n_rows += 1;
    }

    if n_rows == 0 {
        return Err(TableError::Empty);
    }
    if skipped > 0 {
        debug!("skipped {} header lines",skipped);
    }
    Ok(Array2::from_shape_vec((n_rows,n_cols),flat)?)
}

#[test]
fn header_lines_are_skipped(){
    let table = parse("VERSION: BVECTOR\n1 0 0 1000\n0 1 0 0\n").unwrap();
    assert_eq!(table.nrows(),2);
    assert_eq!(table.ncols(),4);
    assert_eq!(table[[0,3]],1000.0);
}

#[test]
fn numeric_line_check(){
    assert!(starts_numeric("1 0 0 1000"));
    assert!(starts_numeric("-0.5 0 0 0"));
    assert!(starts_numeric(".5 0 0 0"));
    assert!(starts_numeric("  1.3e-4 0 0 0"));
    assert!(!starts_numeric("VERSION: STEJSKALTANNER"));
    assert!(!starts_numeric(""));
}
