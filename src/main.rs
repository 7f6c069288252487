use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use kopi_dash::config::Config;
use kopi_dash::data::DataStore;
use kopi_dash::report::{self, Page};

const USAGE: &str = "Usage: kopi-dash [dashboard|trend|preference|action-plan|kpi|about] [--charts <dir>]";

struct Args {
    page: Page,
    charts_dir: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut page = Page::Dashboard;
    let mut charts_dir = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--charts" {
            charts_dir = Some(PathBuf::from(iter.next()?));
        } else {
            page = arg.parse().ok()?;
        }
    }

    Some(Args { page, charts_dir })
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    let config = Config::from_env();
    let store = DataStore::new(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let charts = report::render(args.page, &store, &mut out)?;
    out.flush()?;

    if let Some(dir) = args.charts_dir {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
        for chart in &charts {
            let path = dir.join(format!("{}.json", chart.name));
            let json = serde_json::to_string_pretty(&chart.spec)?;
            fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote chart, path={}", path.display());
        }
    }

    Ok(())
}
