//! bigbrain: stamp source files with their repository-relative path

use anyhow::Result;

fn main() -> Result<()> {
    bigbrain::cli::run()
}
