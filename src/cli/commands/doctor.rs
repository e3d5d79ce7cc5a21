//! Doctor command - verify provider configuration, prompts and settings.

use crate::cli::Output;
use crate::config::{Prompts, ProviderConfig, Settings, ENDPOINT_VAR, MODEL_VAR, TOKEN_VAR};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("WebAgent Doctor");
    println!();
    println!("Checking provider configuration, prompts and settings...\n");

    let mut checks = Vec::new();

    // Loads the dotenv file into the process environment as a side effect.
    let env_file = settings.env_file();
    let provider = ProviderConfig::from_env(&env_file);

    println!("{}", style("Model Provider").bold());
    let env_check = check_env_file(&env_file);
    env_check.print();
    checks.push(env_check);
    let var_checks = check_provider_vars(|key| std::env::var(key).ok());
    for check in &var_checks {
        check.print();
    }
    checks.extend(var_checks);
    if let Ok(provider) = &provider {
        Output::kv("Endpoint", &provider.endpoint);
    }

    println!();

    println!("{}", style("Prompts").bold());
    let prompts_check = check_prompts(&settings.prompts_path());
    prompts_check.print();
    checks.push(prompts_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before running the agent.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! WebAgent is ready to use.");
    }

    Ok(())
}

fn check_env_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Env file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Env file",
            &format!("{} not found", path.display()),
            "Provider values must then come from the process environment",
        )
    }
}

/// Check each provider variable, masking the token.
fn check_provider_vars<F>(lookup: F) -> Vec<CheckResult>
where
    F: Fn(&str) -> Option<String>,
{
    [ENDPOINT_VAR, MODEL_VAR, TOKEN_VAR]
        .iter()
        .map(|&key| {
            let hint = format!("Set {} in the env file or environment", key);
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(value) if value.is_empty() => CheckResult::error(key, "empty", &hint),
                Some(value) if key == TOKEN_VAR => {
                    CheckResult::ok(key, &format!("configured ({})", mask_secret(&value)))
                }
                Some(value) => CheckResult::ok(key, &value),
                None => CheckResult::error(key, "not set", &hint),
            }
        })
        .collect()
}

fn check_prompts(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Prompt templates",
            &format!("{} not found, using defaults", path.display()),
            "Create the file to customise the agent prompts",
        );
    }
    match Prompts::load(path) {
        Ok(_) => CheckResult::ok("Prompt templates", &format!("{}", path.display())),
        Err(e) => CheckResult::warning(
            "Prompt templates",
            &format!("{} is invalid, using defaults", path.display()),
            &e.to_string(),
        ),
    }
}

fn check_config_file(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Print the defaults with: webagent config show",
        );
    }
    match Settings::load_from(Some(&path.to_path_buf())) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", path.display())),
        Err(e) => CheckResult::error("Config file", &format!("{}", path.display()), &e.to_string()),
    }
}

/// Show only the edges of a secret.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret("abcd1234567890wxyz"), "abcd...wxyz");
    }

    #[test]
    fn test_provider_vars() {
        let checks = check_provider_vars(|key| match key {
            "AZURE_ENDPOINT" => Some("https://models.example.com".to_string()),
            "AZURE_TOKEN" => Some("secret-token-value".to_string()),
            _ => None,
        });
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].status, CheckStatus::Ok);
        assert_eq!(checks[1].status, CheckStatus::Error);
        assert_eq!(checks[1].message, "not set");
        assert!(!checks[2].message.contains("secret-token-value"));
    }

    #[test]
    fn test_prompt_check_states() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.toml");
        assert_eq!(check_prompts(&path).status, CheckStatus::Warning);

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "system = \"You are {{{{name}}}}.\"").unwrap();
        assert_eq!(check_prompts(&path).status, CheckStatus::Ok);

        std::fs::write(&path, "system = [unclosed").unwrap();
        assert_eq!(check_prompts(&path).status, CheckStatus::Warning);
    }

    #[test]
    fn test_config_check_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        std::fs::write(&path, "[agent]\nmax_steps = \"many\"\n").unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Error);
    }
}
