use ndarray::{s, Array2, Axis};
use crate::scheme::SchemeFormat;

/// Acquisition parameters shared by every member of a shell, decoded from the
/// descriptor columns according to the scheme format.
#[derive(Debug,Clone,PartialEq)]
pub enum ShellParams {
    BValue,
    StejskalTanner{g:f64,big_delta:f64,small_delta:f64,te:f64},
    Waveform{te:f64,wf:Vec<f64>},
}

#[derive(Debug,Clone)]
pub struct Shell {
    pub b:f64,
    pub params:ShellParams,
    pub idx:Vec<usize>,
    pub grad:Array2<f64>,
}

impl Shell {
    pub fn g(&self) -> Option<f64> {
        match &self.params {
            ShellParams::StejskalTanner{g,..} => Some(*g),
            _ => None,
        }
    }
    pub fn big_delta(&self) -> Option<f64> {
        match &self.params {
            ShellParams::StejskalTanner{big_delta,..} => Some(*big_delta),
            _ => None,
        }
    }
    pub fn small_delta(&self) -> Option<f64> {
        match &self.params {
            ShellParams::StejskalTanner{small_delta,..} => Some(*small_delta),
            _ => None,
        }
    }
    pub fn te(&self) -> Option<f64> {
        match &self.params {
            ShellParams::StejskalTanner{te,..} => Some(*te),
            ShellParams::Waveform{te,..} => Some(*te),
            ShellParams::BValue => None,
        }
    }
    pub fn wf(&self) -> Option<&[f64]> {
        match &self.params {
            ShellParams::Waveform{wf,..} => Some(wf),
            _ => None,
        }
    }
}

/// Group weighted rows into shells of identical descriptor columns (columns
/// 3..M, everything but the gradient direction). Distinct descriptors are
/// kept in first-occurrence order, compared by exact floating-point equality.
/// Descriptors whose b-value falls at or below the threshold never form a
/// shell.
pub(crate) fn group(raw:&Array2<f64>,b:&[f64],format:SchemeFormat,b0_thr:f64) -> Vec<Shell> {
    let n = raw.nrows();
    let desc = raw.slice(s![..,3..]);

    let mut reps = Vec::<usize>::new();
    for i in 0..n {
        if !reps.iter().any(|&r| desc.row(r) == desc.row(i)) {
            reps.push(i);
        }
    }

    let mut shells = Vec::<Shell>::new();
    for &rep in &reps {
        if b[rep] <= b0_thr {
            continue;
        }
        let row = raw.row(rep);
        let params = match format {
            SchemeFormat::BValue => ShellParams::BValue,
            SchemeFormat::StejskalTanner => ShellParams::StejskalTanner {
                g:row[3],
                big_delta:row[4],
                small_delta:row[5],
                te:row[6],
            },
            SchemeFormat::Waveform => ShellParams::Waveform {
                te:row[3],
                wf:row.iter().skip(4).copied().collect(),
            },
        };
        let idx:Vec<usize> = (0..n).filter(|&i| desc.row(i) == desc.row(rep)).collect();
        let grad = raw.slice(s![..,0..3]).select(Axis(0),&idx);
        shells.push(Shell {
            b:b[rep],
            params,
            idx,
            grad,
        });
    }
    shells
}
