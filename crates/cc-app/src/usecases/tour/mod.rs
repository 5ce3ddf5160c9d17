mod sequencer;

pub use sequencer::{EventOutcome, TourSequencer, TourView};
