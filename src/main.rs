//! Opens a window with the default 100-ring galaxy.
//!
//! Run with: `cargo run --release`
//!
//! Set `RUST_LOG=debug` for resize and loader details.

use galaxy::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = Galaxy::new().run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
