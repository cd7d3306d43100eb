use std::fmt;
use std::path::Path;
use log::debug;
use ndarray::{s, Array1, Array2, Axis};
use crate::bvalue;
use crate::error::SchemeError;
use crate::shell::{self, Shell};

/// How each row of the table describes its gradient, decided by the column
/// count: 4 columns carry a bare b-value, 7 carry the Stejskal-Tanner pulse
/// parameters, more than 7 carry an echo time plus a sampled waveform.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SchemeFormat {
    BValue,
    StejskalTanner,
    Waveform,
}

impl fmt::Display for SchemeFormat {
    fn fmt(&self,f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeFormat::BValue => write!(f,"b-value"),
            SchemeFormat::StejskalTanner => write!(f,"Stejskal-Tanner"),
            SchemeFormat::Waveform => write!(f,"gradient waveform"),
        }
    }
}

/// A diffusion acquisition scheme: one row per acquired volume, columns 0-2
/// the gradient direction, remaining columns the per-format descriptor.
/// Built once from a file or a matrix; b-values, the b0/dwi split and the
/// shell grouping are all derived during construction.
#[derive(Debug)]
pub struct Scheme {
    pub raw:Array2<f64>,
    pub format:SchemeFormat,
    pub b:Vec<f64>,
    pub b0_thr:f64,
    pub b0_idx:Vec<usize>,
    pub dwi_idx:Vec<usize>,
    pub shells:Vec<Shell>,
}

impl Scheme {
    pub fn from_file(scheme_path:&Path,b0_thr:f64) -> Result<Self,SchemeError> {
        let table = num_table::load(scheme_path)?;
        Self::from_table(table,b0_thr)
    }

    /// A length-M vector is a scheme with a single volume.
    pub fn from_row(row:Array1<f64>,b0_thr:f64) -> Result<Self,SchemeError> {
        Self::from_table(row.insert_axis(Axis(0)),b0_thr)
    }

    pub fn from_table(mut raw:Array2<f64>,b0_thr:f64) -> Result<Self,SchemeError> {
        let format = match raw.ncols() {
            4 => SchemeFormat::BValue,
            7 => SchemeFormat::StejskalTanner,
            m if m > 7 => SchemeFormat::Waveform,
            m => return Err(SchemeError::UnrecognizedFormat(m)),
        };

        let b:Vec<f64> = match format {
            SchemeFormat::BValue => raw.column(3).to_vec(),
            SchemeFormat::StejskalTanner => raw
                .outer_iter()
                .map(|row| bvalue::stejskal_tanner(row[3],row[4],row[5]))
                .collect(),
            SchemeFormat::Waveform => raw
                .outer_iter()
                .map(|row| {
                    let g:Vec<f64> = row.iter().skip(4).copied().collect();
                    bvalue::waveform(&g,row[3],bvalue::WaveformUnit::Usual)
                })
                .collect(),
        };

        let b0_idx:Vec<usize> = b.iter().enumerate().filter(|(_,&v)| v <= b0_thr).map(|(i,_)| i).collect();
        let dwi_idx:Vec<usize> = b.iter().enumerate().filter(|(_,&v)| v > b0_thr).map(|(i,_)| i).collect();

        // flip directions with negative y into the canonical hemisphere;
        // a gradient and its antipode are equivalent
        for mut row in raw.outer_iter_mut() {
            if row[1] < 0.0 {
                row[0] = -row[0];
                row[1] = -row[1];
                row[2] = -row[2];
            }
        }

        let shells = shell::group(&raw,&b,format,b0_thr);
        debug!("{} scheme: {} volumes, {} b0, {} dwi, {} shells",
               format,raw.nrows(),b0_idx.len(),dwi_idx.len(),shells.len());

        Ok(Self {
            raw,
            format,
            b,
            b0_thr,
            b0_idx,
            dwi_idx,
            shells,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.b0_count() + self.dwi_count()
    }

    pub fn b0_count(&self) -> usize {
        self.b0_idx.len()
    }

    pub fn dwi_count(&self) -> usize {
        self.dwi_idx.len()
    }

    /// Reduce the scheme to a Stejskal-Tanner description. A Stejskal-Tanner
    /// scheme passes through untouched. A waveform scheme is approximated by
    /// a single pulse pair with the assumed fixed timings and the gradient
    /// strength solved from each row's b-value; the result is a brand-new
    /// scheme rebuilt from that table. A bare b-value scheme carries no
    /// physical timing to recover, so the conversion is refused.
    pub fn to_version_1(self) -> Result<Self,SchemeError> {
        match self.format {
            SchemeFormat::StejskalTanner => Ok(self),
            SchemeFormat::Waveform => {
                let n = self.raw.nrows();
                let mut table = Array2::<f64>::zeros((n,7));
                for i in 0..n {
                    table.slice_mut(s![i,0..3]).assign(&self.raw.slice(s![i,0..3]));
                    table[[i,3]] = bvalue::stejskal_tanner_g(self.b[i]);
                    table[[i,4]] = bvalue::ASSUMED_BIG_DELTA;
                    table[[i,5]] = bvalue::ASSUMED_DELTA;
                    table[[i,6]] = self.raw[[i,3]];
                }
                Scheme::from_table(table,0.0)
            }
            SchemeFormat::BValue => Err(SchemeError::UnsupportedConversion(self.format)),
        }
    }
}
