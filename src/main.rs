//! Preview binary: opens a window that drives the orbit camera around a
//! unit cube.
//!
//! Usage: `gltf-orbit [OPTIONS.toml]`

use std::path::Path;

use gltf_orbit::{Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
