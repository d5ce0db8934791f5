//! Tests for configuration loading

use temp_dir::TempDir;
use weeklist::config::Config;

#[test]
fn test_config_file_overrides_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("weeklist.toml");
    std::fs::write(
        &path,
        r#"
[database]
url = "sqlite:other.db"
max_connections = 2

[lists]
max_weeks = 12

[menu]
dir = "/var/lib/weeklist/menus"
"#,
    )?;

    let config = Config::load(Some(path.display().to_string()))?;

    assert_eq!(config.lists.max_weeks, 12);
    assert_eq!(config.database.max_connections, 2);
    assert_eq!(config.menu.dir, "/var/lib/weeklist/menus");
    assert_eq!(config.matching.max_key_words, 3);
    assert_eq!(config.matching.min_shared_words, 2);
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = Config::load(Some(dir.child("absent.toml").display().to_string()))?;

    assert_eq!(config.lists.max_weeks, 8);
    assert_eq!(config.menu.dir, "./menus");
    assert!(!config.observability.json);

    Ok(())
}

#[test]
fn test_single_shared_word_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("weeklist.toml");
    std::fs::write(&path, "[matching]\nmin_shared_words = 1\n")?;

    let config = Config::load(Some(path.display().to_string()))?;
    assert!(config.validate().is_err());

    Ok(())
}
