//! `chorrillos serve` – run the HTTP API.

use anyhow::Result;
use chorrillos_core::api;
use chorrillos_core::config::ChorrillosConfig;

pub async fn run_serve(mut cfg: ChorrillosConfig, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        cfg.bind = bind;
    }
    cfg.validate()?;
    api::serve(&cfg).await
}
