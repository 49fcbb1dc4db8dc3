//! The `medcof animate` command.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::Instant;

use medcof_core::driver::AnimationDriver;
use medcof_core::traits::SystemClock;
use medcof_core::{Dashboard, ModuleId, StatTriple};

use super::GlobalArgs;

pub async fn execute(global: &GlobalArgs, from: Option<u32>, to: u32) -> Result<()> {
    let (config, catalog) = global.load()?;
    let mut dashboard = Dashboard::with_clock(catalog, Arc::new(SystemClock), None);

    let start_stats = match from {
        Some(id) => {
            dashboard.select_module(ModuleId(id))?;
            dashboard.target_stats()
        }
        None => StatTriple::ZERO,
    };
    dashboard.select_module(ModuleId(to))?;

    let mut driver = AnimationDriver::new(start_stats, config.frame_interval());
    let mut rx = driver.subscribe();
    let started = Instant::now();
    let run = driver.retarget(dashboard.target_stats());

    println!("{}", dashboard.active_module().title);
    loop {
        if rx.changed().await.is_err() {
            break;
        }
        let frame = *rx.borrow_and_update();
        if frame.run != run {
            continue;
        }
        println!("{:>4}ms  {}", started.elapsed().as_millis(), frame.stats);
        if frame.done {
            break;
        }
    }
    driver
        .finished()
        .await
        .context("animation task failed")?;

    Ok(())
}
