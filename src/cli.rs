// src/cli.rs
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};

use crate::browser::Session;
use crate::config::{AppOptions, Target};
use crate::progress::Progress;
use crate::runner::{self, RunSummary};
use crate::specs::Counts;
use crate::store::ReviewStore;

const RULE: &str = "================================================================================";

#[derive(Debug, Parser)]
#[command(name = "gym_reviews", version, about = "Collect gym reviews from Google Maps and review sites into one CSV")]
pub struct Args {
    /// TOML file overriding any part of the built-in configuration
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset path (CSV)
    #[arg(short, long, value_name = "CSV")]
    pub out: Option<PathBuf>,

    /// WebDriver server URL, e.g. a running chromedriver
    #[arg(long, value_name = "URL")]
    pub webdriver: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    /// Built-in defaults, then the config file, then command-line flags.
    pub fn options(&self) -> Result<AppOptions> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::load(path)?,
            None => AppOptions::default(),
        };
        if let Some(out) = &self.out {
            opts.store.path = out.clone();
        }
        if let Some(url) = &self.webdriver {
            opts.browser.webdriver_url = url.clone();
        }
        if self.headless {
            opts.browser.headless = true;
        }
        Ok(opts)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init();

    let opts = args.options()?;
    let store = ReviewStore::open(&opts.store.path)
        .wrap_err_with(|| format!("cannot open dataset {}", opts.store.path.display()))?;

    println!("{RULE}");
    println!("CALIFORNIA GYM REVIEWS - ALL SOURCES");
    println!("{RULE}");
    println!("Initial reviews in CSV: {}", store.count());
    println!();

    let mut session = Session::open(&opts.browser, opts.pacing.clone(), opts.selectors.page.clone())
        .wrap_err_with(|| format!("cannot start a browser session at {}", opts.browser.webdriver_url))?;

    let today = Local::now().date_naive();
    let mut bar = CliProgress::new();
    let summary = runner::run(&session, &store, &opts.targets, &opts.selectors, today, Some(&mut bar));
    session.close();

    print_summary(&summary);
    Ok(())
}

fn print_summary(s: &RunSummary) {
    println!();
    println!("{RULE}");
    println!("COLLECTION COMPLETE - ALL SOURCES");
    println!("{RULE}");
    println!("Total time: {:.1} seconds", s.elapsed.as_secs_f64());
    println!("Sources processed: {}", s.targets);
    println!("Total reviews in CSV: {}", s.final_count);
    println!("New reviews added: {}", s.totals.new);
    println!("Reviews failed to scrape: {}", s.totals.failed);
    println!("{RULE}");
    if s.final_count > 0 {
        println!();
        println!("File saved: {}", s.path.display());
        println!("File size: {:.1} KB", s.size_bytes as f64 / 1024.0);
    }
}

/* ---------------- Progress bar ---------------- */

struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let style = ProgressStyle::with_template("{msg:32} {percent:>3}% [{bar:40}] {pos}/{len}")
            .map(|s| s.progress_chars("█▌ "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(0);
        bar.set_style(style);
        Self { bar }
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn log(&mut self, msg: &str) {
        self.bar.println(format!("\nSOURCE: {}", msg.to_uppercase()));
        self.bar.println("-".repeat(60));
    }

    fn target_start(&mut self, index: usize, target: &Target<'_>) {
        let len = self.bar.length().unwrap_or(0);
        self.bar.println(format!("\n[{}/{}] {} ({})", index + 1, len, target.location, target.source));
        self.bar.set_message(target.location.to_string());
    }

    fn target_done(&mut self, _target: &Target<'_>, c: &Counts) {
        self.bar.println(format!(
            "   Results: Found: {}, Successful: {}, Failed: {}, New: {}",
            c.found, c.successful, c.failed, c.new
        ));
        self.bar.inc(1);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}
