//! Execute command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qasm_adapter_sim::StatevectorRegister;
use qasm_bridge::{Outcome, pipeline};
use qasm_lang::Grammar;

use super::config::QuantumComputerConfig;

/// Execute a program file and return the process exit status.
pub fn execute(
    file: &Path,
    grammar: Option<&Path>,
    seed: Option<u64>,
    config_path: &Path,
) -> Result<i32> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let grammar = match grammar {
        Some(path) => Grammar::from_path(path)
            .with_context(|| format!("Failed to load grammar: {}", path.display()))?,
        None => Grammar::builtin().context("Built-in grammar is invalid")?,
    };

    let statements = match pipeline::front_end(&source, &grammar) {
        Ok(statements) => statements,
        Err(rejected) => {
            report(&rejected);
            return Ok(rejected.exit_code());
        }
    };

    let config = QuantumComputerConfig::load(config_path)?;
    let register = match seed {
        Some(seed) => StatevectorRegister::with_seed(config.qubits, seed),
        None => StatevectorRegister::new(config.qubits),
    }
    .context("Failed to open quantum register")?;

    info!(file = %file.display(), qubits = config.qubits, "Executing program");
    let outcome = pipeline::execute(&statements, register);
    report(&outcome);

    Ok(outcome.exit_code())
}

fn report(outcome: &Outcome) {
    for measurement in outcome.measurements() {
        println!("{} {}", style("MEASURE").cyan().bold(), measurement);
    }
    for line in outcome.diagnostics() {
        eprintln!("{}", style(line).red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn setup(qubits: u32, program: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        QuantumComputerConfig { qubits }.save(&config).unwrap();

        let file = dir.path().join("program.qasm");
        fs::write(&file, program).unwrap();
        (dir, config, file)
    }

    #[test]
    fn test_successful_program() {
        let (_dir, config, file) = setup(2, "H q1\nMEASURE\n");
        assert_eq!(execute(&file, None, Some(1), &config).unwrap(), 0);
    }

    #[test]
    fn test_syntax_error_exit_code() {
        let (_dir, config, file) = setup(2, "X q1, q2\n");
        assert_eq!(execute(&file, None, None, &config).unwrap(), 65);
    }

    #[test]
    fn test_runtime_error_exit_code() {
        let (_dir, config, file) = setup(2, "R 0.5, q3\n");
        assert_eq!(execute(&file, None, None, &config).unwrap(), 70);
    }

    #[test]
    fn test_missing_config_is_error() {
        let (dir, _config, file) = setup(2, "H q1\n");
        let missing = dir.path().join("missing.json");
        let err = execute(&file, None, None, &missing).unwrap_err();
        assert!(err.to_string().contains("not set up"));
    }

    #[test]
    fn test_rejected_program_does_not_need_config() {
        let (dir, _config, file) = setup(2, "X q1, q2\n");
        let missing = dir.path().join("missing.json");
        assert_eq!(execute(&file, None, None, &missing).unwrap(), 65);

        fs::write(&file, "H q1 $\n").unwrap();
        assert_eq!(execute(&file, None, None, &missing).unwrap(), 65);
    }

    #[test]
    fn test_missing_program_file() {
        let (dir, config, _file) = setup(2, "");
        let err = execute(&dir.path().join("nope.qasm"), None, None, &config).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_custom_grammar_file() {
        let (dir, config, file) = setup(1, "H\n");
        let grammar = dir.path().join("grammar.json");
        fs::write(&grammar, "{}").unwrap();
        // An incomplete grammar is rejected before anything runs.
        assert!(execute(&file, Some(&grammar), None, &config).is_err());
    }
}
