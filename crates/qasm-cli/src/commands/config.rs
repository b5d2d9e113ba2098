//! Quantum computer configuration: `config setup` and `config show`.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted description of the target quantum computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumComputerConfig {
    /// Register size used by `execute`.
    pub qubits: u32,
}

impl QuantumComputerConfig {
    /// Load the configuration stored at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let not_set_up = || {
            format!(
                "quantum computer config not set up; run `qasm config setup` (looked in {})",
                path.display()
            )
        };

        let contents = fs::read_to_string(path).with_context(not_set_up)?;
        let config: Self = serde_json::from_str(&contents).with_context(not_set_up)?;
        if config.qubits == 0 {
            anyhow::bail!("{}", not_set_up());
        }

        debug!(path = %path.display(), qubits = config.qubits, "Loaded config");
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Name/value pairs in display order.
    fn entries(&self) -> Vec<(&'static str, String)> {
        vec![("qubits", self.qubits.to_string())]
    }
}

/// Resolve the config file location: an explicit path, else `~/.qasm/config.json`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".qasm").join("config.json"))
}

/// Validate a qubit count as one or two decimal digits with value at least one.
pub fn parse_qubits(input: &str) -> Result<u32> {
    let input = input.trim();
    let well_formed =
        (1..=2).contains(&input.len()) && input.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        anyhow::bail!("invalid number of qubits '{input}' (expected format [0-9]{{1,2}})");
    }

    match input.parse::<u32>() {
        Ok(qubits) if qubits >= 1 => Ok(qubits),
        _ => anyhow::bail!("invalid number of qubits '{input}' (must be at least 1)"),
    }
}

/// Execute `config setup`.
pub fn execute_setup(path: &Path, qubits: Option<&str>) -> Result<()> {
    let raw = match qubits {
        Some(value) => value.to_string(),
        None => prompt_qubits(io::stdin().lock(), io::stdout())?,
    };

    let config = QuantumComputerConfig {
        qubits: parse_qubits(&raw)?,
    };
    config.save(path)?;

    println!(
        "{} Saved config to {}",
        style("✓").green().bold(),
        style(path.display()).green()
    );
    print_table(&config);
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = QuantumComputerConfig::load(path)?;
    print_table(&config);
    Ok(())
}

fn prompt_qubits(mut input: impl BufRead, mut output: impl Write) -> Result<String> {
    write!(output, "Enter number of qubits in the quantum computer: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read number of qubits")?;
    Ok(line.trim().to_string())
}

fn print_table(config: &QuantumComputerConfig) {
    println!();
    println!("{}", style("Quantum Computer Config").bold());
    for line in render_table(config) {
        println!("{line}");
    }
}

fn render_table(config: &QuantumComputerConfig) -> Vec<String> {
    let entries = config.entries();
    let width = entries
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut lines = vec![
        format!("  {:<width$}  Value", "Name"),
        format!("  {:-<width$}  -----", ""),
    ];
    lines.extend(
        entries
            .into_iter()
            .map(|(name, value)| format!("  {name:<width$}  {value}")),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qubits() {
        assert_eq!(parse_qubits("5").unwrap(), 5);
        assert_eq!(parse_qubits("24").unwrap(), 24);
        assert_eq!(parse_qubits(" 7\n").unwrap(), 7);
        assert_eq!(parse_qubits("01").unwrap(), 1);
    }

    #[test]
    fn test_parse_qubits_rejects() {
        for bad in ["", "0", "00", "100", "-1", "x", "2.5", "1 2"] {
            assert!(parse_qubits(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = QuantumComputerConfig { qubits: 3 };
        config.save(&path).unwrap();
        assert_eq!(QuantumComputerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuantumComputerConfig::load(&dir.path().join("config.json")).unwrap_err();
        assert!(err.to_string().contains("not set up"));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "qbits": 2 }"#).unwrap();
        assert!(QuantumComputerConfig::load(&path).is_err());

        fs::write(&path, r#"{ "qubits": 0 }"#).unwrap();
        assert!(QuantumComputerConfig::load(&path).is_err());
    }

    #[test]
    fn test_setup_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        execute_setup(&path, Some("12")).unwrap();
        assert_eq!(QuantumComputerConfig::load(&path).unwrap().qubits, 12);

        assert!(execute_setup(&path, Some("123")).is_err());
        assert_eq!(QuantumComputerConfig::load(&path).unwrap().qubits, 12);
    }

    #[test]
    fn test_prompt_reads_line() {
        let mut output = Vec::new();
        let value = prompt_qubits(&b"4\n"[..], &mut output).unwrap();
        assert_eq!(value, "4");
        assert!(String::from_utf8(output).unwrap().starts_with("Enter number"));
    }

    #[test]
    fn test_render_table() {
        let lines = render_table(&QuantumComputerConfig { qubits: 2 });
        assert_eq!(lines, vec!["  Name    Value", "  ------  -----", "  qubits  2"]);
    }

    #[test]
    fn test_explicit_config_path() {
        let path = config_path(Some(Path::new("/tmp/qasm.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/qasm.json"));
    }
}
