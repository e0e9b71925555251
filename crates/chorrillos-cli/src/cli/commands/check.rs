//! `chorrillos check <url>` – offline map-link format check.

use anyhow::Result;
use chorrillos_core::url_model::{is_shortened_map_url, is_valid_map_url, validate_input};

pub fn run_check(url: &str) -> Result<()> {
    validate_input(url)?;
    if !is_valid_map_url(url) {
        anyhow::bail!("not a recognized map link: {}", url.trim());
    }
    if is_shortened_map_url(url) {
        println!("map link (short link, will be expanded)");
    } else {
        println!("map link");
    }
    Ok(())
}
