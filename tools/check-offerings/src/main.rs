use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};
use structopt::{clap, StructOpt};

use bigiot_client::cli::{ConsumerOpts, MarketOpts};
use bigiot_client::Consumer;

mod categories;
mod check;
mod report;

/// Subscribes to and accesses every offering of the given categories, then
/// reports which of them deliver data and allow browser (CORS) access.
#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
#[structopt(global_setting = clap::AppSettings::ColoredHelp)]
#[structopt(global_setting = clap::AppSettings::DeriveDisplayOrder)]
struct Args {
    #[structopt(flatten)]
    market: MarketOpts,
    #[structopt(flatten)]
    consumer: ConsumerOpts,
    /// Offering category to check; all known categories when omitted
    #[structopt(long)]
    category: Vec<String>,
    /// Also write an HTML report to this file
    #[structopt(long, parse(from_os_str))]
    html: Option<PathBuf>,
}

impl Args {
    fn categories(&self) -> Vec<String> {
        if self.category.is_empty() {
            categories::KNOWN_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            self.category.clone()
        }
    }
}

async fn my_main() -> Result</*exit code*/ i32> {
    dotenv::dotenv().ok();
    if env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none() {
        env::set_var(env_logger::DEFAULT_FILTER_ENV, "info");
    }
    env_logger::init();

    let args = Args::from_args();
    let configuration = args.market.configuration()?;
    let probe = check::probe_client(&configuration);

    let mut consumer = Consumer::new(configuration, args.consumer.credentials());
    consumer
        .authenticate()
        .await
        .context("consumer authentication failed")?;

    let mut reports = Vec::new();
    for category in args.categories() {
        let checked = check::check_category(&consumer, &probe, &category)
            .await
            .with_context(|| format!("discovering offerings of {}", category))?;
        reports.extend(checked);
    }

    print!("{}", report::render_csv(&reports));

    if let Some(path) = &args.html {
        fs::write(path, report::render_html(&reports))
            .with_context(|| format!("writing HTML report to {}", path.display()))?;
        log::info!("HTML report written to {}", path.display());
    }

    let failed = reports
        .iter()
        .filter(|r| r.fetch_error.is_some())
        .count();
    log::info!(
        "{} offering(s) checked, {} without data",
        reports.len(),
        failed
    );
    Ok(0)
}

#[actix_rt::main]
async fn main() {
    std::process::exit(match my_main().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("Error: {:?}", e);
            1
        }
    });
}
