//! Walks an [`ExpiringMap`] through a timed timeline and logs its state after
//! every step.
//!
//! Run with: `cargo run -p lapse-demo [-- --mock]`
//!
//! - `--mock` advances a mock clock instead of sleeping.
//! - `LAPSE_DEMO_TIME_SCALE` scales every TTL and pause (e.g. `0.1`).
//! - `LAPSE_LOG_FORMAT=json` switches to JSON log lines; `RUST_LOG` filters
//!   them (default `info`).

use std::process::ExitCode;
use std::time::Duration;
use std::{env, thread};

use lapse_common::{Clock, ExpiringMap, ExpiringMapConfig, MockClock, SystemClock};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod settings;

use settings::{DemoSettings, LOG_FORMAT_VAR};

type DemoMap<C> = ExpiringMap<String, i32, C>;

fn main() -> ExitCode {
    let settings = match DemoSettings::parse(env::args().skip(1), |name| env::var(name).ok()) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json"));
            error!(error = %format!("{e:#}"), "invalid demo settings");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(settings.json_logs);

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(settings: &DemoSettings) -> anyhow::Result<()> {
    let config = ExpiringMapConfig::tracked();
    info!(mock_clock = settings.mock_clock, time_scale = settings.time_scale, "demo starting");

    if settings.mock_clock {
        let clock = MockClock::new();
        let handle = clock.clone();
        let map = DemoMap::with_clock(config, clock)?;
        run_timeline(map, settings, move |pause| handle.advance(pause));
    } else {
        let map = DemoMap::with_clock(config, SystemClock)?;
        run_timeline(map, settings, thread::sleep);
    }

    Ok(())
}

fn run_timeline<C, W>(mut map: DemoMap<C>, settings: &DemoSettings, mut wait: W)
where
    C: Clock,
    W: FnMut(Duration),
{
    let ttl = |millis: u64| i64::try_from(settings.scale_millis(millis)).unwrap_or(i64::MAX);
    let mut pause = |millis: u64| wait(Duration::from_millis(settings.scale_millis(millis)));

    map.put("hello".to_string(), 1, ttl(500));
    map.put("world".to_string(), 2, ttl(100));
    report(&mut map, "inserted hello and world");

    map.put("world".to_string(), 2, ttl(3_000));
    pause(1_000);
    report(&mut map, "re-inserted world, paused 1s");

    pause(3_000);
    report(&mut map, "paused 3s");

    map.put("hello".to_string(), 11, ttl(50_000));
    map.put("world".to_string(), 12, ttl(40_000));
    report(&mut map, "inserted new hello and world");

    let keys = map.keys().join(" ");
    info!(keys = %keys, "live keys by deadline");

    map.erase("hello");
    report(&mut map, "erased hello");

    pause(2_000);
    report(&mut map, "paused 2s");

    let stats = map.stats();
    map.clear();
    report(&mut map, "cleared");

    info!(
        hits = stats.hits,
        misses = stats.misses,
        inserts = stats.inserts,
        expirations = stats.expirations,
        stale_discards = stats.stale_discards,
        hit_rate = stats.hit_rate(),
        "demo finished"
    );
}

fn report<C: Clock>(map: &mut DemoMap<C>, stage: &str) {
    let size = map.size();
    info!(
        stage,
        size,
        hello = map.get("hello"),
        hello_left_ms = map.left("hello"),
        world = map.get("world"),
        world_left_ms = map.left("world"),
        "map state"
    );
}
