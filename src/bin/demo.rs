//! Demo driver: exercises the C surface the way a foreign host does
//!
//! Creates a counter, registers a callback recording every triggering value,
//! pings a fixed number of times and prints what fired.

use pingpong::ffi::{
    self, hello_world, hello_world_free, ping_pong_free, ping_pong_last_error, ping_pong_new,
    ping_pong_ping, ping_pong_set_callback, Handle, NULL_HANDLE,
};
use pingpong::Config;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::path::PathBuf;
use tracing::{debug, error, info};

thread_local! {
    static TRIGGERED: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
}

extern "C" fn record(value: i32) {
    TRIGGERED.with(|t| t.borrow_mut().push(value));
}

#[derive(Debug)]
struct Args {
    start: Option<i32>,
    trigger: Option<i32>,
    pings: Option<u32>,
    config: Option<PathBuf>,
}

impl Args {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let prog = args.first().map(String::as_str).unwrap_or("pingpong-demo");

        let mut parsed = Self {
            start: None,
            trigger: None,
            pings: None,
            config: None,
        };

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(Self::usage(prog)),
                "--start" => parsed.start = Some(Self::value(arg, iter.next())?),
                "--trigger" => parsed.trigger = Some(Self::value(arg, iter.next())?),
                "--pings" => parsed.pings = Some(Self::value(arg, iter.next())?),
                "--config" => {
                    let path = iter.next().ok_or_else(|| format!("{} needs a value", arg))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                opt => return Err(format!("Unknown option: {}\n\n{}", opt, Self::usage(prog))),
            }
        }

        Ok(parsed)
    }

    fn value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
        let raw = value.ok_or_else(|| format!("{} needs a value", flag))?;
        raw.parse()
            .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
    }

    fn usage(prog: &str) -> String {
        format!(
            "pingpong demo - drive the counter through its C interface\n\n\
            USAGE:\n    {} [OPTIONS]\n\n\
            OPTIONS:\n    \
            -h, --help          Print help information\n    \
            --start <N>         Initial count (default 0)\n    \
            --trigger <N>       Fire on multiples of N (default 3)\n    \
            --pings <N>         Number of pings (default 11)\n    \
            --config <FILE>     Read defaults from a TOML file",
            prog
        )
    }
}

/// Frees the handle on every exit path
struct Owned(Handle);

impl Drop for Owned {
    fn drop(&mut self) {
        ping_pong_free(self.0);
    }
}

fn hello(to: &str) -> Result<String, Box<dyn std::error::Error>> {
    let to = CString::new(to)?;
    unsafe {
        let raw = hello_world(to.as_ptr());
        if raw.is_null() {
            return Err("hello_world returned null".into());
        }
        let text = CStr::from_ptr(raw).to_string_lossy().into_owned();
        hello_world_free(raw);
        Ok(text)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    ffi::ping_pong_init();
    info!("pingpong demo starting");

    let args = match Args::from_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    let start = args.start.unwrap_or(config.demo.start);
    let trigger = args.trigger.unwrap_or(config.demo.trigger);
    let pings = args.pings.unwrap_or(config.demo.pings);
    debug!(start, trigger, pings, "demo parameters");

    println!("{}", hello("from the Rust native library called by the demo driver")?);

    let handle = ping_pong_new(start, trigger);
    if handle == NULL_HANDLE {
        let code = ping_pong_last_error();
        error!(code, "could not create counter");
        return Err(format!("ping_pong_new failed with error {}", code).into());
    }
    let counter = Owned(handle);

    ping_pong_set_callback(counter.0, Some(record));
    for _ in 0..pings {
        ping_pong_ping(counter.0);
    }
    drop(counter);

    let triggered = TRIGGERED.with(|t| t.borrow().clone());
    println!(
        "With start at {}, trigger at {} and {} number of pings, here are the values that produced a trigger -> {:?}",
        start, trigger, pings, triggered
    );

    Ok(())
}
