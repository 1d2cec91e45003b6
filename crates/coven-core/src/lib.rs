#![deny(warnings)]
pub mod bot;
pub mod config;
pub mod engine;
pub mod model;
pub mod pool;
pub mod worker;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "coven"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
