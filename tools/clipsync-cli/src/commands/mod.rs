pub mod boundary;
pub mod captions;
pub mod export;
pub mod lookup;
pub mod waveform;
