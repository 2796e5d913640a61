//! farm: runs the farm economy for a fixed wall-clock duration.
//!
//! ```text
//! farm [CONFIG.json] [SECONDS]
//! ```
//!
//! Without a config file the default layout and population are used.  Any
//! field missing from the JSON keeps its default.  Statistics are sampled
//! to `output/farm/farm_stats.csv` and the final counters are printed as
//! JSON on stdout.  `RUST_LOG=info` shows the once-per-second summary.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;

use farm_core::{EntityKind, FarmConfig, StatsSnapshot};
use farm_output::{StatsCsvObserver, StatsCsvWriter};
use farm_sim::{FarmBuilder, FarmObserver};
use farm_spatial::RegistryView;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SECONDS: u64 = 30;
const OUTPUT_DIR:      &str = "output/farm";

// ── Observer wrapper to count frames ──────────────────────────────────────────

/// Forwards to the CSV observer and keeps a few numbers for the summary.
struct ConsoleObserver {
    inner:        StatsCsvObserver,
    frames:       u64,
    eggs_on_show: usize,
}

impl ConsoleObserver {
    fn new(inner: StatsCsvObserver) -> Self {
        Self { inner, frames: 0, eggs_on_show: 0 }
    }
}

impl FarmObserver for ConsoleObserver {
    fn on_start(&mut self, config: &FarmConfig) {
        self.inner.on_start(config);
    }

    fn redisplay(&mut self, view: &RegistryView<'_>, stats: &StatsSnapshot) {
        self.frames += 1;
        self.eggs_on_show = view.count_kind(EntityKind::Egg);
        self.inner.redisplay(view, stats);
    }

    fn on_stats(&mut self, elapsed: Duration, stats: &StatsSnapshot) {
        self.inner.on_stats(elapsed, stats);
    }

    fn on_stop(&mut self, stats: &StatsSnapshot) {
        self.inner.on_stop(stats);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: &str) -> Result<FarmConfig> {
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 2 {
        bail!("usage: farm [CONFIG.json] [SECONDS]");
    }
    let config = match args.first() {
        Some(path) => load_config(path)?,
        None => FarmConfig::default(),
    };
    let seconds = match args.get(1) {
        Some(s) => s.parse::<u64>().with_context(|| format!("bad duration {s:?}"))?,
        None => DEFAULT_SECONDS,
    };

    let p = &config.population;
    info!(
        "{} chickens, {} children, {} cows, seed {}, running {seconds} s",
        p.chickens, p.children, p.cows, config.seed
    );

    let farm = FarmBuilder::new(config).build()?;
    let writer = StatsCsvWriter::new(Path::new(OUTPUT_DIR))?;
    let observer = ConsoleObserver::new(StatsCsvObserver::new(writer));

    let report = farm.run_for(Duration::from_secs(seconds), observer)?;

    let mut observer = report.observer;
    if let Some(e) = observer.inner.take_error() {
        eprintln!("output error: {e}");
    }
    info!(
        "{} frames drawn, {} eggs still in nests, levels {:?}",
        observer.frames, observer.eggs_on_show, report.levels
    );
    info!("finished in {:.3} s", report.elapsed.as_secs_f64());

    println!("{}", serde_json::to_string_pretty(&report.stats)?);
    Ok(())
}
