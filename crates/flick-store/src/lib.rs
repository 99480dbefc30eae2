//! Persistence for flick: TOML config files, sample traces and session
//! recordings.

pub mod config;
pub mod error;
pub mod recording;
pub mod time;
pub mod trace;

pub use config::{
    CONFIG_ENV, ConfigSource, default_base_dir, load_config, load_config_from, parse_config,
    render_config, resolve_config_source,
};
pub use error::{Result, StoreError};
pub use recording::{RECORDING_HEADER, SessionRecorder, write_session_to};
pub use trace::{
    TRACE_HEADER, read_trace, read_trace_from, trace_capabilities, write_trace, write_trace_to,
};
