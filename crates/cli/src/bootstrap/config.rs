use geoquery_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path
            .map(str::to_string)
            .or_else(Config::get_config_path)
            .unwrap_or_else(|| "default".to_string()),
        web_port = config.server.web_port,
        bind = %config.server.bind_address,
        origin = %config.origin.base_url,
        max_entries = config.cache.max_entries,
        expire_after_access_secs = config.cache.expire_after_access_secs,
        "Configuration loaded"
    );

    Ok(config)
}
