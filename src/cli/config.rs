use kiln::config::Config;
use kiln::core::path::config_file;
use kiln::core::{KilnError, KilnResult};

/// Print the effective user config as YAML
pub fn show() -> KilnResult<()> {
    let config = Config::load()?;
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| KilnError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", yaml);
    Ok(())
}

/// Print where the config file lives
pub fn path() -> KilnResult<()> {
    println!("{}", config_file()?.display());
    Ok(())
}
