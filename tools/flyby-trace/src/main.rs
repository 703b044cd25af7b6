//! Runs a flyby field headlessly and prints one JSON line per rendered frame.
//!
//! Run from repo root:
//!   `cargo run -p flyby-trace`                                 - 300 frames at 60 fps, unseeded
//!   `cargo run -p flyby-trace -- --seed 7 --frames 600`        - reproducible run
//!   `cargo run -p flyby-trace -- --toggle-at 2000 --toggle-at 3500`
//!   `cargo run -p flyby-trace -- --config field.json -vv`      - custom config, debug logging
//!
//! Options:
//!   `--config <path>`     JSON `FieldConfig`; missing fields take their defaults
//!   `--seed <n>`          seed for the random source (default: system generator)
//!   `--frames <n>`        number of frames to emit (default 300)
//!   `--fps <n>`           host frame rate (default 60)
//!   `--width <px>`        viewport width (default 1280)
//!   `--height <px>`       viewport height (default 720)
//!   `--toggle-at <ms>`    flip suppression mode at this host time; repeatable
//!   `-v`, `-vv`, `-vvv`   log at info, debug, trace (default warn)

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use flyby_core::{FlybyRng, RandomSource, SystemRandom, Viewport};
use flyby_lifecycle::{ChaosField, ElementId, FieldConfig, Frame, FrameRecorder};
use serde::Serialize;

const USAGE: &str = "usage: flyby-trace [--config <path>] [--seed <n>] [--frames <n>] [--fps <n>] \
                     [--width <px>] [--height <px>] [--toggle-at <ms>]... [-v...]";

struct Options {
    config: Option<String>,
    seed: Option<u64>,
    frames: u32,
    fps: f64,
    viewport: Viewport,
    toggles: Vec<f64>,
    verbose: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            frames: 300,
            fps: 60.0,
            viewport: Viewport::default(),
            toggles: Vec::new(),
            verbose: 0,
        }
    }
}

#[derive(Serialize)]
struct TraceLine {
    #[serde(flatten)]
    frame: Frame,
    suppressed: bool,
    pending_timers: usize,
    completed: Vec<ElementId>,
}

fn value<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    let raw = args
        .next()
        .ok_or_else(|| format!("{flag} needs a value\n{USAGE}"))?;
    raw.parse()
        .map_err(|e: T::Err| format!("invalid value {raw:?} for {flag}: {e}").into())
}

fn parse_args() -> Result<Option<Options>, Box<dyn Error>> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(value(&mut args, "--config")?),
            "--seed" => options.seed = Some(value(&mut args, "--seed")?),
            "--frames" => options.frames = value(&mut args, "--frames")?,
            "--fps" => options.fps = value(&mut args, "--fps")?,
            "--width" => options.viewport.width = value(&mut args, "--width")?,
            "--height" => options.viewport.height = value(&mut args, "--height")?,
            "--toggle-at" => options.toggles.push(value(&mut args, "--toggle-at")?),
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(None);
            }
            flag if flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v') => {
                options.verbose = options.verbose.saturating_add((flag.len() - 1) as u8);
            }
            other => return Err(format!("unknown argument {other:?}\n{USAGE}").into()),
        }
    }

    if !(options.fps > 0.0) || !options.fps.is_finite() {
        return Err(format!("--fps must be positive, got {}", options.fps).into());
    }
    options.toggles.sort_by(|a, b| a.total_cmp(b));
    Ok(Some(options))
}

fn load_config(path: Option<&str>) -> Result<FieldConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(FieldConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    let config = serde_json::from_str(&text).map_err(|e| format!("parsing {path}: {e}"))?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let Some(options) = parse_args()? else {
        return Ok(());
    };

    let level = match options.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(options.config.as_deref())?;
    let rng: Box<dyn RandomSource> = match options.seed {
        Some(seed) => Box::new(FlybyRng::new(seed)),
        None => Box::new(SystemRandom::new()),
    };
    let mut field = ChaosField::with_rng(config, rng)?.with_viewport(options.viewport);
    log::info!("running {} frames at {} fps: {field:?}", options.frames, options.fps);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut recorder = FrameRecorder::new();
    let mut toggles = options.toggles.iter().copied().peekable();
    let step = 1000.0 / options.fps;

    field.start(0.0);
    for index in 0..options.frames {
        let now = f64::from(index) * step;
        while let Some(at) = toggles.next_if(|&at| at <= now) {
            let change = field.toggle(at);
            log::info!("toggle at {at}: {change:?}");
        }

        let completed = field.advance(now);
        field.render(recorder.at(now));
        for frame in recorder.take() {
            let line = TraceLine {
                frame,
                suppressed: field.is_suppressed(),
                pending_timers: field.pending_timers(),
                completed: completed.clone(),
            };
            serde_json::to_writer(&mut out, &line)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    log::info!("done: {field:?}");
    Ok(())
}
