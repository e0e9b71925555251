//! `chorrillos resolve <url>` – follow a map link and print its coordinates.

use anyhow::{Context, Result};
use chorrillos_core::config::ChorrillosConfig;
use chorrillos_core::fetch_head::CurlExpander;
use chorrillos_core::resolver::ResolutionBody;
use chorrillos_core::{CoordinateResolver, Outcome};
use std::sync::Arc;

pub fn run_resolve(cfg: &ChorrillosConfig, url: &str, json: bool) -> Result<()> {
    let expander = Arc::new(CurlExpander::new(cfg.http.clone()));
    let resolver = CoordinateResolver::new(expander, cfg.expand_mode);

    let result = resolver.resolve(url);
    let outcome = Outcome::of(&result);
    let resolution = result.context(outcome.message())?;

    if json {
        let body = ResolutionBody::from(&resolution);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match resolution.coordinates {
        Some(c) => println!("{}\t{}", c.lat(), c.lng()),
        None => println!("{}", outcome.message()),
    }
    if resolution.redirects > 0 {
        println!(
            "Resolved URL ({} redirect(s)): {}",
            resolution.redirects, resolution.resolved_url
        );
    }
    Ok(())
}
