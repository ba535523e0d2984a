//! Audio decoding, format conformance and concatenation.

pub mod combined;
pub mod resample;
pub mod wav;

pub use combined::{ClipSpan, CombinedAudio};
pub use wav::{decode_wav, encode_wav, read_wav, write_synthesized};
