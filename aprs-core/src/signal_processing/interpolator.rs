//! Polyphase FIR interpolator (§4.6): upsamples complex baseband by `L`
//! with a windowed-sinc low-pass kernel, decomposed into `L` sub-filters
//! each operating at the input rate.

use num_complex::Complex64;
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Taps per polyphase branch. `L * TAPS_PER_BRANCH` total prototype taps;
/// a span of 8 input-rate samples gives good stopband rejection without
/// an excessive filter length.
const TAPS_PER_BRANCH: usize = 8;

/// Designs the prototype windowed-sinc low-pass kernel for an `L`×
/// interpolator, normalized so the passband gain equals `L` (§4.6 Filter
/// design): this compensates for the energy loss of zero-stuffing.
fn design_prototype(l: usize) -> Vec<f64> {
    let num_taps = TAPS_PER_BRANCH * l;
    // Cutoff centered in the transition band described in spec.md §4.6,
    // expressed as a fraction of the *input* rate and converted to the
    // output-rate-normalized cycles/sample used by the sinc design below.
    let cutoff = 0.45 / l as f64;

    let center = (num_taps - 1) as f64 / 2.0;
    let mut h = vec![0.0f64; num_taps];
    for (i, tap) in h.iter_mut().enumerate() {
        let n = i as f64 - center;
        let sinc = if n.abs() < 1e-12 {
            2.0 * cutoff
        } else {
            (2.0 * PI * cutoff * n).sin() / (PI * n)
        };
        // Hamming window.
        let window = 0.54 - 0.46 * (2.0 * PI * i as f64 / (num_taps - 1) as f64).cos();
        *tap = sinc * window;
    }

    let dc_gain: f64 = h.iter().sum();
    let scale = l as f64 / dc_gain;
    for tap in h.iter_mut() {
        *tap *= scale;
    }
    h
}

/// Streaming polyphase FIR interpolator. Internal history (the filter delay
/// line) is scoped to one frame, matching §5 ("no cross-frame history").
pub struct PolyphaseInterpolator {
    l: usize,
    /// `branches[p][k]` = prototype tap `h[k*L + p]`.
    branches: Vec<Vec<f64>>,
    /// Most recent `TAPS_PER_BRANCH` input samples, newest at index 0.
    history: VecDeque<Complex64>,
}

impl PolyphaseInterpolator {
    /// Builds an `L`×-interpolator. `l` must be positive; callers reach
    /// this stage only after `PipelineConfig::interpolation_factor` has
    /// already been validated (see `pipeline::generate_with_logger`), since
    /// a DSP stage constructor is the wrong place to surface a typed
    /// configuration error to an external caller.
    pub fn new(l: usize) -> Self {
        let prototype = design_prototype(l);
        let mut branches = vec![Vec::with_capacity(TAPS_PER_BRANCH); l];
        for (j, &tap) in prototype.iter().enumerate() {
            branches[j % l].push(tap);
        }
        Self {
            l,
            branches,
            history: VecDeque::from(vec![Complex64::new(0.0, 0.0); TAPS_PER_BRANCH]),
        }
    }

    pub fn interpolation_factor(&self) -> usize {
        self.l
    }

    /// Consumes every sample in `input`, returning `input.len() * L` output
    /// samples and the number of input samples consumed (always
    /// `input.len()`, since each input sample deterministically produces
    /// `L` outputs — the `usize` is returned to mirror the streaming
    /// ring-buffer contract in `spec.md` §4.6 for callers that slice their
    /// own input chunks).
    pub fn process(&mut self, input: &[Complex64]) -> (Vec<Complex64>, usize) {
        let mut out = Vec::with_capacity(input.len() * self.l);
        for &sample in input {
            self.history.push_front(sample);
            self.history.truncate(TAPS_PER_BRANCH);
            for branch in &self.branches {
                let mut acc = Complex64::new(0.0, 0.0);
                for (k, &coeff) in branch.iter().enumerate() {
                    acc += self.history[k] * coeff;
                }
                out.push(acc);
            }
        }
        (out, input.len())
    }
}
