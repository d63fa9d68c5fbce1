//! DSP stages of the signal-generation pipeline: AFSK tone synthesis, FM
//! modulation, and polyphase FIR interpolation (§4.4–§4.6).

pub mod afsk;
pub mod fm;
pub mod interpolator;

pub use afsk::AfskSynthesizer;
pub use fm::FmModulator;
pub use interpolator::PolyphaseInterpolator;
