use anyhow::Result;

use edgefade_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    if write {
        config.save()?;
        println!("Configuration written to {}", AppConfig::config_path().display());
        return Ok(());
    }

    println!("# {}", AppConfig::config_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}
