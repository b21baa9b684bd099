use super::context::AppContext;
use super::progress::is_interactive;
use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use moviedeck_config::{Config, API_KEY_ENV};
use serde_json::json;
use std::path::PathBuf;

pub fn run_config(cmd: ConfigCommands, context: &AppContext, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, context, output),
        ConfigCommands::ApiKey { clear: true, .. } => clear_api_key(context, output),
        ConfigCommands::ApiKey { key, .. } => configure_api_key(key, context, output),
        ConfigCommands::Set {
            base_url,
            image_base_url,
            language,
            timeout_secs,
            home_section_limit,
            similar_limit,
            suggestion_limit,
            suggestion_debounce_ms,
            log_file,
        } => {
            let mut config = context.config.clone();
            let changes = SettingChanges {
                base_url,
                image_base_url,
                language,
                timeout_secs,
                home_section_limit,
                similar_limit,
                suggestion_limit,
                suggestion_debounce_ms,
                log_file,
            };
            if !changes.apply(&mut config) {
                output.warn("No settings given. See 'moviedeck config set --help'.");
                return Ok(());
            }
            config
                .validate()
                .map_err(|e| eyre!("Invalid setting: {}", e))?;

            let config_file = context.paths.config_file();
            config
                .save_to_file(&config_file)
                .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
            output.success(format!("Configuration saved to {}", config_file.display()));
            Ok(())
        }
        ConfigCommands::Paths => show_paths(context, output),
    }
}

/// Where the API key in effect comes from
fn api_key_source(context: &AppContext) -> Result<(Option<String>, &'static str)> {
    let credentials = context.credentials()?;
    let source = if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        "environment"
    } else if credentials.get_api_key().is_some() {
        "credentials file"
    } else {
        "not set"
    };
    Ok((credentials.resolve_api_key(), source))
}

fn show_config(full: bool, context: &AppContext, output: &Output) -> Result<()> {
    let config = &context.config;
    let (api_key, key_source) = api_key_source(context)?;
    let api_key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "<not set>".to_string(),
    };

    let data = json!({
        "config_file": context.paths.config_file(),
        "api_key": api_key_display,
        "api_key_source": key_source,
        "config": config,
    });

    output.emit(&data, || {
        let mut out = String::new();

        let mut info_table = new_table();
        info_table.set_header(vec![
            Cell::new("Config File").add_attribute(Attribute::Bold),
            Cell::new(context.paths.config_file().display().to_string()),
        ]);
        out.push_str(&format!("\n{}\n\n", info_table));

        let mut api_table = section_table("API");
        api_table.add_row(vec![Cell::new("API Key"), Cell::new(format!("{} ({})", api_key_display, key_source))]);
        api_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.api.base_url)]);
        api_table.add_row(vec![Cell::new("Image Base URL"), Cell::new(&config.api.image_base_url)]);
        api_table.add_row(vec![
            Cell::new("Language"),
            Cell::new(config.api.language.as_deref().unwrap_or("<api default>")),
        ]);
        api_table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.api.timeout_secs))]);
        out.push_str(&format!("{}\n\n", api_table));

        let mut display_table = section_table("Display");
        display_table.add_row(vec![Cell::new("Home Section Limit"), Cell::new(config.display.home_section_limit)]);
        display_table.add_row(vec![Cell::new("Similar Limit"), Cell::new(config.display.similar_limit)]);
        display_table.add_row(vec![Cell::new("Suggestion Limit"), Cell::new(config.display.suggestion_limit)]);
        display_table.add_row(vec![
            Cell::new("Suggestion Min Chars"),
            Cell::new(config.display.suggestion_min_chars),
        ]);
        display_table.add_row(vec![
            Cell::new("Suggestion Debounce"),
            Cell::new(format!("{}ms", config.display.suggestion_debounce_ms)),
        ]);
        out.push_str(&format!("{}\n\n", display_table));

        let mut storage_table = section_table("Storage");
        storage_table.add_row(vec![Cell::new("Wishlist Key"), Cell::new(&config.wishlist.storage_key)]);
        storage_table.add_row(vec![
            Cell::new("Storage File"),
            Cell::new(context.paths.storage_file().display().to_string()),
        ]);
        storage_table.add_row(vec![
            Cell::new("Log File"),
            Cell::new(
                context
                    .log_file()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<stderr>".to_string()),
            ),
        ]);
        out.push_str(&storage_table.to_string());
        out
    });

    Ok(())
}

fn configure_api_key(key: Option<String>, context: &AppContext, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None if is_interactive() => prompts::prompt_password("TMDB API key")?,
        None => return Err(eyre!("No API key given. Pass --key or run interactively.")),
    };

    validate_api_key(&key).map_err(|e| eyre!("{}", e))?;

    let mut credentials = context.credentials()?;
    credentials.set_api_key(key.trim().to_string());
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("API key saved to {}", context.paths.credentials_file().display()));
    if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV));
    }
    Ok(())
}

fn clear_api_key(context: &AppContext, output: &Output) -> Result<()> {
    let mut credentials = context.credentials()?;
    if credentials.get_api_key().is_none() {
        output.info("No API key is stored");
        return Ok(());
    }

    credentials.clear_api_key();
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
    output.success("Stored API key removed");
    Ok(())
}

fn show_paths(context: &AppContext, output: &Output) -> Result<()> {
    let paths = &context.paths;
    let data = json!({
        "config_file": paths.config_file(),
        "credentials_file": paths.credentials_file(),
        "storage_file": paths.storage_file(),
        "log_dir": paths.log_dir(),
    });

    output.emit(&data, || {
        let mut table = new_table();
        table.add_row(vec![Cell::new("Config"), Cell::new(paths.config_file().display().to_string())]);
        table.add_row(vec![Cell::new("Credentials"), Cell::new(paths.credentials_file().display().to_string())]);
        table.add_row(vec![Cell::new("Storage"), Cell::new(paths.storage_file().display().to_string())]);
        table.add_row(vec![Cell::new("Logs"), Cell::new(paths.log_dir().display().to_string())]);
        table.to_string()
    });
    Ok(())
}

/// Optional overrides from `config set`
struct SettingChanges {
    base_url: Option<String>,
    image_base_url: Option<String>,
    language: Option<String>,
    timeout_secs: Option<u64>,
    home_section_limit: Option<usize>,
    similar_limit: Option<usize>,
    suggestion_limit: Option<usize>,
    suggestion_debounce_ms: Option<u64>,
    log_file: Option<String>,
}

impl SettingChanges {
    /// Returns whether anything was given
    fn apply(self, config: &mut Config) -> bool {
        let mut changed = false;

        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url.trim_end_matches('/').to_string();
            changed = true;
        }
        if let Some(image_base_url) = self.image_base_url {
            config.api.image_base_url = image_base_url.trim_end_matches('/').to_string();
            changed = true;
        }
        if let Some(language) = self.language {
            config.api.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());
            changed = true;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.api.timeout_secs = timeout_secs;
            changed = true;
        }
        if let Some(limit) = self.home_section_limit {
            config.display.home_section_limit = limit;
            changed = true;
        }
        if let Some(limit) = self.similar_limit {
            config.display.similar_limit = limit;
            changed = true;
        }
        if let Some(limit) = self.suggestion_limit {
            config.display.suggestion_limit = limit;
            changed = true;
        }
        if let Some(ms) = self.suggestion_debounce_ms {
            config.display.suggestion_debounce_ms = ms;
            changed = true;
        }
        if let Some(log_file) = self.log_file {
            config.logging.file = Some(log_file.trim().to_string())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from);
            changed = true;
        }

        changed
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn section_table(title: &str) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn validate_api_key(input: &str) -> Result<(), &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("API key cannot be empty");
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("API key cannot contain whitespace");
    }
    Ok(())
}
