//! `chorrillos reverse <lat> <lng>` and `chorrillos search <address>`.

use anyhow::Result;
use chorrillos_core::config::ChorrillosConfig;
use chorrillos_core::geocode;
use chorrillos_core::CoordinatePair;

pub fn run_reverse(cfg: &ChorrillosConfig, lat: &str, lng: &str) -> Result<()> {
    let pair = CoordinatePair::parse_pair(lat, lng)?;
    match geocode::reverse(pair, &cfg.geocode)? {
        Some(address) => println!("{address}"),
        None => println!("No address found at {pair}"),
    }
    Ok(())
}

pub fn run_search(cfg: &ChorrillosConfig, address: &str) -> Result<()> {
    match geocode::search(address, &cfg.geocode)? {
        Some(hit) => println!(
            "{}\t{}\t{}",
            hit.coordinates.lat(),
            hit.coordinates.lng(),
            hit.address
        ),
        None => println!("No match for {address:?}"),
    }
    Ok(())
}
