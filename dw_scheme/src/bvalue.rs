// gyromagnetic ratio of the proton in rad/s/T
pub const GAMMA:f64 = 267.513e6;
// the value the waveform integration has always used; kept distinct from
// GAMMA so both formulas reproduce their reference outputs exactly
pub const GAMMA_WF:f64 = 2.6751987e8;

// echo time assumed when a waveform is evaluated outside of a scheme table
pub const DEFAULT_TE:f64 = 0.100;

// fixed timings assumed when reducing a waveform scheme to a single-pulse
// Stejskal-Tanner description
pub const ASSUMED_BIG_DELTA:f64 = 0.025;
pub const ASSUMED_DELTA:f64 = 0.010;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum WaveformUnit {
    Usual,
    Si,
}

/// b-value (s/mm^2) of a single trapezoidal pulse pair with gradient strength
/// `g` (T/m), separation `big_delta` (s) and duration `small_delta` (s).
/// Physically implausible timings (delta > Delta, zeros) are not validated;
/// the numeric result falls out as-is.
pub fn stejskal_tanner(g:f64,big_delta:f64,small_delta:f64) -> f64 {
    (GAMMA * g * small_delta).powi(2) * (big_delta - small_delta / 3.0) * 1e-6
}

/// b-value of an arbitrary effective gradient waveform `g` sampled uniformly
/// over the echo time `te` (s). The q-trajectory is the running integral of
/// the waveform; b is its squared norm integrated over time.
pub fn waveform(g:&[f64],te:f64,unit:WaveformUnit) -> f64 {
    let dt = te / g.len() as f64;
    let mut running = 0.0;
    let mut sum_sq = 0.0;
    for sample in g {
        running += sample;
        let q = running * dt * GAMMA_WF;
        sum_sq += q * q;
    }
    let b = sum_sq * dt;
    match unit {
        WaveformUnit::Usual => b / 1e6,
        _ => b,
    }
}

pub fn waveform_default(g:&[f64]) -> f64 {
    waveform(g,DEFAULT_TE,WaveformUnit::Usual)
}

/// Gradient strength that reproduces `b` under the assumed fixed timings.
pub fn stejskal_tanner_g(b:f64) -> f64 {
    (b / (GAMMA * GAMMA * ASSUMED_DELTA * ASSUMED_DELTA * (ASSUMED_BIG_DELTA - ASSUMED_DELTA / 3.0))).sqrt()
}

#[test]
fn stejskal_tanner_reference_value(){
    let b = stejskal_tanner(1e-3,0.025,0.010);
    let expected = (267.513e6_f64 * 1e-3 * 0.010).powi(2) * (0.025 - 0.010 / 3.0) * 1e-6;
    assert!(((b - expected) / expected).abs() < 1e-6);
}

#[test]
fn waveform_unit_fallback_is_unscaled(){
    let g = [1.0,1.0,1.0,1.0,0.0,0.0,-1.0,-1.0];
    let usual = waveform(&g,0.05,WaveformUnit::Usual);
    let si = waveform(&g,0.05,WaveformUnit::Si);
    assert!(((si / usual) - 1e6).abs() < 1e-3);
}

#[test]
fn standalone_evaluation_assumes_the_default_echo_time(){
    let g = [0.5,0.5,0.5,0.5,-0.5,-0.5,-0.5,-0.5];
    assert_eq!(waveform_default(&g),waveform(&g,DEFAULT_TE,WaveformUnit::Usual));
}

#[test]
fn assumed_timing_inversion_round_trips(){
    let b = 1500.0;
    let g = stejskal_tanner_g(b);
    let back = stejskal_tanner(g,ASSUMED_BIG_DELTA,ASSUMED_DELTA);
    assert!(((back - b) / b).abs() < 1e-9);
}

#[test]
fn implausible_timings_propagate(){
    // delta > 3*Delta makes the diffusion term negative; no validation happens
    let b = stejskal_tanner(1e-3,0.005,0.025);
    assert!(b < 0.0);
    assert!(stejskal_tanner_g(-1.0).is_nan());
}
