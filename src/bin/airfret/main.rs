//! airfret - play an MPE zone grid by waving simulated hands at it
//!
//! Run with: cargo run

mod app;
mod sim;
mod ui;

use app::Airfret;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    Airfret::new().config_path("airfret.toml").run()
}
