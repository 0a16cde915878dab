//! # Voxel World Entry Point
//!
//! Runs the library's headless session. Set `VOXEL_WORLD_CONFIG` to a JSON config
//! file and `RUST_LOG` to pick the log level.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(error) = voxel_world::run() {
        log::error!("{error}");
        eprintln!("voxel-world: {error}");
        std::process::exit(1);
    }
}
