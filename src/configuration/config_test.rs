use std::io::Write;

use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();

    assert!(toml_res.is_ok());
    assert!(res.contains("assistant = \"simulated\""));
    assert!(res.contains("reply-delay = 1500"));
    assert!(res.contains("file-upload-delay = 500"));
    assert!(res.contains("file-processing-delay = 1500"));
    assert!(res.contains("# username"));
}

#[test]
fn it_returns_defaults() {
    assert_eq!(Config::default(ConfigKey::Assistant), "simulated");
    assert_eq!(Config::default(ConfigKey::ReplyDelay), "1500");
    assert_eq!(Config::default(ConfigKey::FileUploadDelay), "500");
    assert_eq!(Config::default(ConfigKey::FileProcessingDelay), "1500");
    assert!(!Config::default(ConfigKey::ConfigFile).is_empty());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let mut config_file = tempfile::NamedTempFile::new()?;
    writeln!(config_file, "username = \"marcus\"")?;
    writeln!(config_file, "reply-delay = 1200")?;

    let config_path = config_file.path().to_string_lossy().to_string();
    let matches = cli::build().try_get_matches_from(vec!["docuchat", "-c", &config_path])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Username), "marcus");
    assert_eq!(Config::get(ConfigKey::ReplyDelay), "1200");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_an_invalid_assistant() -> Result<()> {
    let mut config_file = tempfile::NamedTempFile::new()?;
    writeln!(config_file, "assistant = \"gpt9000\"")?;

    let config_path = config_file.path().to_string_lossy().to_string();
    let matches = cli::build().try_get_matches_from(vec!["docuchat", "-c", &config_path])?;
    let res = Config::load(cli::build(), vec![&matches]).await;

    assert!(res.is_err());

    return Ok(());
}
