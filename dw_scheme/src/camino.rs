use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::error::SchemeError;
use crate::scheme::{Scheme, SchemeFormat};

const STEJSKAL_TANNER_HEADER:&str = "VERSION: STEJSKALTANNER";
// the reference writer emits a trailing space on this header line
const WAVEFORM_HEADER:&str = "VERSION: GRADIENT_WAVEFORM ";

impl Scheme {
    /// Write the scheme in the Camino scheme-file convention. Only the two
    /// physically-described formats have a Camino representation; a bare
    /// b-value scheme is refused.
    pub fn write_camino_schemefile(&self,schemefile_path:&Path) -> Result<(),SchemeError> {
        let contents = match self.format {
            SchemeFormat::StejskalTanner => self.stejskal_tanner_schemefile(),
            SchemeFormat::Waveform => self.waveform_schemefile(),
            SchemeFormat::BValue => return Err(SchemeError::UnsupportedSerialization(self.format)),
        };
        let mut f = File::create(schemefile_path)?;
        f.write_all(contents.as_bytes())?;
        Ok(())
    }

    fn stejskal_tanner_schemefile(&self) -> String {
        let mut s = String::new();
        s.push_str(STEJSKAL_TANNER_HEADER);
        s.push('\n');
        for row in self.raw.outer_iter() {
            let fields:Vec<String> = row.iter().map(|&v| fmt_field(v)).collect();
            s.push_str(&fields.join(" "));
            s.push('\n');
        }
        s
    }

    fn waveform_schemefile(&self) -> String {
        let mut s = String::new();
        s.push_str(WAVEFORM_HEADER);
        s.push('\n');
        for row in self.raw.outer_iter() {
            let te = row[3];
            let g:Vec<f64> = row.iter().skip(4).copied().collect();
            let gx:Vec<f64> = g.iter().map(|v| v * row[0]).collect();
            let gy:Vec<f64> = g.iter().map(|v| v * row[1]).collect();
            let gz:Vec<f64> = g.iter().map(|v| v * row[2]).collect();
            write_waveform_row(&mut s,g.len(),te,&gx,&gy,&gz);
        }
        s
    }
}

// one waveform line: <sample count> <dt> then x/y/z triplets per sample,
// every field followed by a space
fn write_waveform_row(s:&mut String,nb_steps:usize,te:f64,gx:&[f64],gy:&[f64],gz:&[f64]) {
    let dt = te / nb_steps as f64;
    s.push_str(&format!("{} {} ",nb_steps,dt));
    for i in 0..nb_steps {
        s.push_str(&format!("{} {} {} ",round5(gx[i]),round5(gy[i]),round5(gz[i])));
    }
    s.push('\n');
}

fn round5(v:f64) -> f64 {
    (v * 1e5).round() / 1e5
}

// %15.8e: 8 decimals, two-digit signed exponent, right-aligned to width 15
fn fmt_field(v:f64) -> String {
    let s = format!("{:.8e}",v);
    match s.split_once('e') {
        Some((mantissa,exponent)) => {
            let (sign,digits) = match exponent.strip_prefix('-') {
                Some(d) => ("-",d),
                None => ("+",exponent),
            };
            format!("{:>15}",format!("{}e{}{:0>2}",mantissa,sign,digits))
        }
        None => format!("{:>15}",s),
    }
}

#[test]
fn field_formatting_matches_savetxt(){
    assert_eq!(fmt_field(1000.0)," 1.00000000e+03");
    assert_eq!(fmt_field(-0.04),"-4.00000000e-02");
    assert_eq!(fmt_field(0.0)," 0.00000000e+00");
    assert_eq!(fmt_field(0.025)," 2.50000000e-02");
}

#[test]
fn rounding_to_five_decimals(){
    assert_eq!(round5(0.123456789),0.12346);
    assert_eq!(round5(-1.0),-1.0);
}
