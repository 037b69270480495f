// Transport module - playback scheduling, recording, metronome
// Poll-driven sessions on a shared clock abstraction

pub mod clock;
pub mod metronome;
pub mod recorder;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use metronome::{ClickType, Metronome};
pub use recorder::Recorder;
pub use scheduler::Scheduler;
