//! `hookset sample-config`

use hook_config::sample::sample_config;

use crate::error::Result;

/// Print the sample configuration to stdout
pub fn run_sample_config() -> Result<()> {
    print!("{}", sample_config());
    Ok(())
}
