//! splat-args: generate parameter options and resolve layered configurations
//!
//! `train` parses the training parameter groups; `render` resolves the rendering
//! groups against the `cfg_args` stored next to a trained model.

use anyhow::Result;

fn main() -> Result<()> {
    splat_args::cli::run()
}
