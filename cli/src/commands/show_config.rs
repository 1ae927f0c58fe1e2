use std::path::Path;

use dclock_core::AppConfig;
use dclock_core::config::{default_config_path, save_config, to_toml};

use crate::cli::ConfigArgs;
use crate::error::CliError;

pub fn run(args: &ConfigArgs, config: &AppConfig, explicit: Option<&Path>) -> Result<(), CliError> {
    if args.path {
        match explicit.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config location available)"),
        }
        return Ok(());
    }

    if let Some(path) = &args.write {
        save_config(path, config)?;
        tracing::info!(path = %path.display(), "Wrote config");
        return Ok(());
    }

    print!("{}", to_toml(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dclock_core::load_config;

    #[test]
    fn test_write_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dclock.toml");

        let mut config = AppConfig::default();
        config.appearance.image_size = 256;
        config.sample_interval_ms = 250;

        let args = ConfigArgs {
            path: false,
            write: Some(path.clone()),
        };
        run(&args, &config, None).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.appearance.image_size, 256);
        assert_eq!(loaded.sample_interval_ms, 250);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConfigArgs {
            path: false,
            write: Some(dir.path().join("nope").join("dclock.toml")),
        };
        assert!(matches!(
            run(&args, &AppConfig::default(), None),
            Err(CliError::Config(_))
        ));
    }
}
