use std::str::FromStr;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Default,
    Json,
    Pretty,
    Compact,
}

pub fn init(level: &str, mode: Mode) -> Result<()> {
    let env_filter = EnvFilter::from_str(level).map_err(|e| anyhow::anyhow!("failed to parse log level: {e}"))?;

    let filter = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_env_filter(env_filter);

    match mode {
        Mode::Default => filter.try_init(),
        Mode::Json => filter.json().try_init(),
        Mode::Pretty => filter.pretty().try_init(),
        Mode::Compact => filter.compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to init logger: {e}"))?;

    Ok(())
}
