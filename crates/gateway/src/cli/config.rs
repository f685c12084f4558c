use fc_domain::config::{Config, ConfigSeverity};

/// Print every config issue. Returns `false` when any of them is an error.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    for issue in &issues {
        println!("{issue}");
    }

    println!(
        "\n{} error(s), {} warning(s) in {config_path}",
        error_count, warning_count,
    );

    error_count == 0
}

/// Dump the resolved config (with all defaults filled in) as TOML.
///
/// A plaintext API key is masked.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let mut shown = config.clone();
    if shown.llm.auth.key.is_some() {
        shown.llm.auth.key = Some("********".into());
    }
    if shown.forum.api_key.is_some() {
        shown.forum.api_key = Some("********".into());
    }
    let output = toml::to_string_pretty(&shown)
        .map_err(|e| anyhow::anyhow!("serializing config: {e}"))?;
    print!("{output}");
    Ok(())
}
