use anyhow::Result;
use clap::Parser;
use feedorder_common::observability::init_logging;
use feedorder_config::FeedOrderConfigLoader;
use feedorder_core::OrderCheck;
use feedorder_drivers::FeedDriver;
use outcome::Outcome;
use settings::{check_options, driver_settings, log_config, Args};
use std::process::ExitCode;
use tracing::{debug, warn};

mod outcome;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("feedorder: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Pass exits 0, a failed check exits 1; setup errors bubble up as `Err`.
async fn run(args: Args) -> Result<ExitCode> {
    // 1) Merge config; flags win over file and environment, then validate once
    let mut cfg = FeedOrderConfigLoader::new()
        .with_optional_file(&args.config)
        .merge()?;
    args.apply(&mut cfg);
    cfg.validate()?;

    let log_path = init_logging(log_config(&cfg))?;
    debug!(log = %log_path.display(), "logging initialised");

    // 2) Run against a fresh session; close it whatever the outcome
    let check = OrderCheck::new(check_options(&cfg));
    let driver = FeedDriver::connect(driver_settings(&cfg)).await?;
    let page = driver.page();
    let result = check.run(&page).await;
    drop(page);
    if let Err(e) = driver.close().await {
        warn!(error = %e, "failed to close WebDriver session");
    }

    // 3) Report
    let listing_url = check.options().listing_url.as_str();
    let outcome = match &result {
        Ok(report) => Outcome::pass(report),
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "order check failed");
            Outcome::fail(e, listing_url)
        }
    };
    println!("{}", outcome.render(cfg.output)?);

    Ok(if outcome.is_pass() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
