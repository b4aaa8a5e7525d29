use repogen::config::Config;
use repogen::core::path::config_file;
use repogen::core::{RepoError, RepoResult};

/// Print the effective configuration as YAML
pub fn show() -> RepoResult<()> {
    let config = Config::load()?;
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| RepoError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", yaml);
    Ok(())
}

/// Print the location of the config file
pub fn path() -> RepoResult<()> {
    println!("{}", config_file()?.display());
    Ok(())
}
