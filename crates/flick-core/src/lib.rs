//! Flick gesture recognition from a stream of linear-acceleration samples.
//!
//! The signal is segmented online into spikes (short, quasi-constant-direction
//! pulses). Two opposing spikes of sufficient combined magnitude form a
//! gesture; wind-up suppression and a cooldown keep each motion to a single
//! event.
//!
//! Zero I/O: samples come in, gestures and telemetry go out. Sensors,
//! persistence and presentation belong to the caller.

pub mod attitude;
pub mod candidate;
pub mod config;
pub mod constants;
pub mod engine;
pub mod gesture;
pub mod quaternion;
pub mod sample;
pub mod spike;
pub mod spike_log;
pub mod synth;
pub mod telemetry;
pub mod vector;

pub use attitude::{AttitudeTracker, upright_platform_attitude};
pub use candidate::{CandidateBuffer, Offer};
pub use config::{ConfigError, GestureConfig, ResumePolicy};
pub use engine::{EngineState, GestureEngine, GestureSink};
pub use gesture::{Axis, Gesture};
pub use quaternion::Quaternion;
pub use sample::{Capabilities, Reading, Sample};
pub use spike::{Spike, SpikePhase};
pub use spike_log::{MatchCriteria, SpikeLog};
pub use synth::TraceBuilder;
pub use telemetry::{Recorder, TickTelemetry};
pub use vector::Vec3;
