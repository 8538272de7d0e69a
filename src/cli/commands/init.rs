//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a
//! `CatalogViewer.toml` configuration file through a short interactive wizard
//! (or with defaults when `--non-interactive` is given).
//!
//! 此模块实现 `init` 命令，通过简短的交互式向导（或在给出 `--non-interactive` 时使用默认值）
//! 创建 `CatalogViewer.toml` 配置文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::config::{DEFAULT_CONFIG_FILE, ViewerConfig, expand_path};
use crate::infra::t;

/// Languages offered by the wizard, in display order.
const LANGUAGES: [&str; 2] = ["en", "pl"];

/// Runs the wizard and writes the configuration file.
///
/// 运行向导并写入配置文件。
pub fn execute(config_path: Option<PathBuf>, non_interactive: bool, language: &str) -> Result<()> {
    let config_path = config_path
        .map(|path| expand_path(&path))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let theme = ColorfulTheme::default();

    if non_interactive {
        let config = ViewerConfig {
            language: language.to_string(),
            ..ViewerConfig::default()
        };
        return write_config(&config_path, &config, language);
    }

    println!("\n{}", t!("init.welcome", locale = language).cyan().bold());

    if config_path.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let mut config = ViewerConfig::default();

    let default_language = LANGUAGES.iter().position(|l| *l == language).unwrap_or(0);
    let language_index = Select::with_theme(&theme)
        .with_prompt(t!("init.language_prompt", locale = language))
        .items(&LANGUAGES)
        .default(default_language)
        .interact()
        .context(t!("init.confirmation_failed", locale = language).to_string())?;
    config.language = LANGUAGES[language_index].to_string();

    config.source.base_url = Input::with_theme(&theme)
        .with_prompt(t!("init.base_url_prompt", locale = language))
        .default(config.source.base_url.clone())
        .interact_text()?;

    config.playlist.interval_ms = Input::with_theme(&theme)
        .with_prompt(t!("init.interval_prompt", locale = language))
        .default(config.playlist.interval_ms)
        .interact_text()?;

    write_config(&config_path, &config, language)
}

fn write_config(path: &Path, config: &ViewerConfig, language: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "{}",
                    t!("init.create_parent_dir_failed", locale = language, path = parent.display())
                )
            })?;
        }
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    fs::write(path, content).with_context(|| {
        format!("{}", t!("init.write_failed", locale = language, path = path.display()))
    })?;

    println!(
        "{}",
        t!("init.success", locale = language, path = path.display()).green()
    );
    Ok(())
}
