//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum gate assembly interpreter",
        style("qasm").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qasm-lang         Scanner, grammar table and parser");
    println!("  qasm-bridge       Statement interpreter and pipeline");
    println!("  qasm-adapter-sim  Statevector quantum register");
    println!("  qasm-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
