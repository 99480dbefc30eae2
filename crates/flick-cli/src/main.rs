mod osc;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use flick_core::{
    Axis, Capabilities, Gesture, GestureConfig, GestureEngine, Reading, Sample, TraceBuilder,
};
use flick_store::SessionRecorder;
use serde::Serialize;
use tokio::net::UdpSocket;
use tokio::time::MissedTickBehavior;

/// 0.02 s sensor step.
const DEFAULT_RATE_HZ: f64 = 50.0;
const SIM_PEAK: f64 = 1.0;
const SIM_WIND_UP_PEAK: f64 = 1.2;
const SIM_WIND_UP: f64 = 0.4;

#[derive(Parser)]
#[command(name = "flick", about = "Flick gesture recognizer: replay, simulate and listen")]
struct Cli {
    /// Config file (default: $FLICK_CONFIG, then ~/.flick/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a recorded trace through the recognizer
    Replay {
        /// Trace CSV (time,ux,uy,uz,gx,gy,gz,qw,qx,qy,qz)
        trace: PathBuf,

        /// Print gestures as JSON lines
        #[arg(long)]
        json: bool,

        /// Write a session recording into this directory
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Write a synthetic trace
    Simulate {
        /// Output CSV path
        out: PathBuf,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_RATE_HZ)]
        rate: f64,

        /// Flick along this axis (repeatable; default: all six)
        #[arg(long = "flick", value_name = "AXIS")]
        flicks: Vec<Axis>,

        /// Precede each flick with a backswing
        #[arg(long)]
        wind_up: bool,
    },

    /// Recognize gestures from OSC sensor messages over UDP
    Listen {
        #[arg(long, default_value = "0.0.0.0:9000")]
        bind: SocketAddr,

        /// Engine tick rate in Hz
        #[arg(long, default_value_t = DEFAULT_RATE_HZ)]
        rate: f64,

        /// Print gestures as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<GestureConfig> {
    flick_store::load_config(cli.config.as_deref()).context("failed to load config")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Replay {
            trace,
            json,
            record,
        } => cmd_replay(&cli, trace, *json, record.as_deref()),
        Commands::Simulate {
            out,
            seed,
            rate,
            flicks,
            wind_up,
        } => cmd_simulate(out, *seed, *rate, flicks, *wind_up),
        Commands::Listen { bind, rate, json } => cmd_listen(&cli, *bind, *rate, *json).await,
        Commands::Config => cmd_config(&cli),
    }
}

// ---------------------------------------------------------------------------
// Gesture output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GestureLine {
    time: f64,
    device_axis: Option<Axis>,
    world_axis: Option<Axis>,
    magnitude: f64,
    elapsed: f64,
    direction_device: [f64; 3],
    direction_world: [f64; 3],
}

impl From<&Gesture> for GestureLine {
    fn from(g: &Gesture) -> Self {
        Self {
            time: g.time,
            device_axis: g.device_axis(),
            world_axis: g.world_axis(),
            magnitude: g.magnitude(),
            elapsed: g.elapsed,
            direction_device: g.direction_device.to_array(),
            direction_world: g.direction_world_horizontal.to_array(),
        }
    }
}

fn axis_label(axis: Option<Axis>) -> &'static str {
    axis.map_or("none", |a| a.as_str())
}

fn print_gesture(g: &Gesture, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&GestureLine::from(g))?);
    } else {
        println!(
            "{:8.3}s  device={:<7} world={:<7} magnitude={:.2} elapsed={:.3}s",
            g.time,
            axis_label(g.device_axis()),
            axis_label(g.world_axis()),
            g.magnitude(),
            g.elapsed
        );
    }
    Ok(())
}

fn start_engine(config: GestureConfig, capabilities: Capabilities) -> Result<GestureEngine> {
    let mut engine = GestureEngine::new(config, capabilities);
    ensure!(engine.begin(), "no usable motion sensor in input");
    Ok(engine)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_replay(cli: &Cli, trace: &Path, json: bool, record: Option<&Path>) -> Result<()> {
    let config = load_config(cli)?;
    let samples = flick_store::read_trace(trace)
        .with_context(|| format!("failed to read trace {}", trace.display()))?;

    let mut gestures = 0usize;
    if !samples.is_empty() {
        let mut engine = start_engine(config, flick_store::trace_capabilities(&samples))?;
        let mut recorder = record.map(|dir| {
            let mut rec = SessionRecorder::new(dir);
            rec.start();
            rec
        });

        for sample in &samples {
            let fired = match recorder.as_mut() {
                Some(rec) => engine.tick_recorded(sample, rec),
                None => engine.tick(sample),
            };
            if let Some(g) = fired {
                gestures += 1;
                print_gesture(&g, json)?;
            }
        }

        if let Some(mut rec) = recorder
            && let Some(path) = rec.finish().context("failed to write recording")?
        {
            eprintln!("recorded session to {}", path.display());
        }
    }

    let summary = format!("processed {} samples, {gestures} gestures", samples.len());
    if json {
        eprintln!("{summary}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn cmd_simulate(out: &Path, seed: u64, rate: f64, flicks: &[Axis], wind_up: bool) -> Result<()> {
    ensure!(rate.is_finite() && rate > 0.0, "rate must be positive, got {rate}");
    let axes: &[Axis] = if flicks.is_empty() { &Axis::ALL } else { flicks };

    let mut builder = TraceBuilder::new(rate, seed);
    builder.idle(0.3);
    for &axis in axes {
        if wind_up {
            builder.flick_with_wind_up(axis, SIM_WIND_UP_PEAK, SIM_WIND_UP);
        } else {
            builder.flick(axis, SIM_PEAK);
        }
        builder.idle(0.8);
    }
    let samples = builder.build();

    flick_store::write_trace(out, &samples)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "wrote {} samples ({} flicks) to {}",
        samples.len(),
        axes.len(),
        out.display()
    );
    Ok(())
}

async fn cmd_listen(cli: &Cli, bind: SocketAddr, rate: f64, json: bool) -> Result<()> {
    ensure!(rate.is_finite() && rate > 0.0, "rate must be positive, got {rate}");
    let config = load_config(cli)?;

    let socket = UdpSocket::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    eprintln!("listening for OSC on {}", socket.local_addr()?);

    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / rate));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let started = Instant::now();
    let mut latest: Option<Reading> = None;
    let mut engine: Option<GestureEngine> = None;
    let mut ticks = 0u64;
    let mut gestures = 0u64;
    let mut buf = [0u8; 2048];

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            recv = socket.recv_from(&mut buf) => {
                let (len, peer) = recv.context("UDP receive failed")?;
                match osc::decode_packet(&buf[..len]) {
                    Ok(messages) => {
                        for msg in messages {
                            match osc::reading_from_args(&msg.args) {
                                Ok(reading) => latest = Some(reading),
                                Err(e) => tracing::debug!(%peer, address = %msg.address, "ignoring message: {e}"),
                            }
                        }
                    }
                    Err(e) => tracing::warn!(%peer, "dropping malformed OSC packet: {e}"),
                }
            }
            _ = interval.tick() => {
                let Some(reading) = latest else { continue };
                if engine.is_none() {
                    let capabilities = match reading {
                        Reading::Fused { .. } => Capabilities::FULL,
                        Reading::Raw { .. } => Capabilities::ACCELEROMETER_ONLY,
                    };
                    tracing::info!(?capabilities, "first reading received; starting engine");
                    engine = Some(start_engine(config.clone(), capabilities)?);
                }
                let Some(engine) = engine.as_mut() else { continue };
                let sample = Sample {
                    time: started.elapsed().as_secs_f64(),
                    reading,
                };
                ticks += 1;
                if let Some(g) = engine.tick(&sample) {
                    gestures += 1;
                    print_gesture(&g, json)?;
                }
            }
        }
    }

    eprintln!("processed {ticks} samples, {gestures} gestures");
    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    print!("{}", flick_store::render_config(&config)?);
    Ok(())
}
