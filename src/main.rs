#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod error;
mod fetch;
mod identity;
mod parse;
mod present;
mod report;
mod section;

use std::time::Instant;

use scraper::Html;

use crate::{
    config::{Config, IdentitySource},
    identity::{StoredIdentity, Store, Terminal},
    report::Report,
};

pub use error::Result;

fn identity_store(source: &IdentitySource) -> Store {
    match source {
        IdentitySource::File(p) => Store::local(p),
        IdentitySource::Memory => {
            log::warn!("identity kept in memory only, it will be asked again next run.");
            Store::AdHoc(StoredIdentity::default())
        }
    }
}

async fn run(config: &Config) -> Result<Report> {
    let start = Instant::now();
    let page = tokio::fs::read_to_string(&config.page).await?;
    let document = Html::parse_document(&page);
    let mut sections = parse::local_sections(&document);
    log::info!(
        "parsed {} local sections in {:?}",
        sections.len(),
        start.elapsed()
    );
    for section in &sections {
        println!(
            "{}: {:.2}/{}",
            section.name().unwrap_or("-"),
            section.total(),
            crate::section::GRADE_SCALE
        );
    }

    if let Some(backend) = &config.backend {
        let mut store = identity_store(&config.identity);
        let identity = || async move {
            store
                .get_or_prompt(&mut Terminal)
                .await
                .map_err(|e| fetch::Error::Identity(e.to_string()))
        };
        let client = fetch::make_client();
        fetch::append_external_grades(&mut sections, &client, backend, identity).await;
    } else {
        log::info!("SKIP_REMOTE set, not contacting the notes backend.");
    }

    Ok(Report::new(sections))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    log::debug!("{config:?}");
    let report = run(&config).await?;
    println!();
    print!("{}", present::text_summary(report.sections()));
    if let Some(output) = &config.output {
        report.save(output).await?;
        log::info!("report written to {}", output.display());
    }
    Ok(())
}
