//! Workspace-wide quality checks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

type CheckFn = fn(&Shell) -> Result<()>;

const CHECKS: [(&str, CheckFn); 5] = [
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
];

/// Run all checks. Outside CI mode failures are reported but don't fail.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "label-wand Quality Check".bold());
    println!("{}", "========================".bold());
    println!();

    let mut all_passed = true;
    for (name, check) in CHECKS {
        println!("{}", format!("Checking {}...", name.to_lowercase()).dimmed());
        let result = check(&sh);
        report_result(name, &result);
        all_passed &= result.is_ok();
    }

    println!();

    if all_passed {
        println!("{}", "✓ All checks passed!".green().bold());
        Ok(())
    } else if ci_mode {
        println!("{}", "✗ Some checks failed.".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
        Ok(())
    }
}

/// Run full CI suite
pub fn run_ci() -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "label-wand CI Suite".bold());
    println!("{}", "===================".bold());
    println!();

    let mut failures = Vec::new();
    for (step, (name, check)) in CHECKS.iter().enumerate() {
        println!("{}", format!("Step {}/{}: {name}...", step + 1, CHECKS.len()).cyan());
        match check(&sh) {
            Ok(()) => println!("  {} {name} OK", "✓".green()),
            Err(e) => {
                println!("  {} {name} failed", "✗".red());
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    println!();

    if failures.is_empty() {
        println!("{}", "═══════════════════════════════════════".green());
        println!("{}", "  ✓ CI PASSED - Ready to push".green().bold());
        println!("{}", "═══════════════════════════════════════".green());
        Ok(())
    } else {
        println!("{}", "═══════════════════════════════════════".red());
        println!("{}", "  ✗ CI FAILED".red().bold());
        println!("{}", "═══════════════════════════════════════".red());
        println!();
        println!("Failures:");
        for f in &failures {
            println!("  - {}", f.red());
        }
        std::process::exit(1);
    }
}

fn report_result(name: &str, result: &Result<()>) {
    match result {
        Ok(()) => println!("  {} {}", "✓".green(), name),
        Err(e) => println!("  {} {} - {}", "✗".red(), name, e),
    }
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Formatting check failed")?;
    Ok(())
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets --all-features -- -D warnings")
        .run()
        .context("Clippy check failed")?;
    Ok(())
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace --all-features")
        .run()
        .context("Tests failed")?;
    Ok(())
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --workspace --no-deps --all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("Documentation build failed")?;
    Ok(())
}

/// Counts unwrap/expect calls in library sources.
///
/// Only `crates/*/src` is scanned, and each file is read up to its first
/// `#[cfg(test)]`.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let mut violations = Vec::new();

    for krate in sh.read_dir("crates")? {
        let src = krate.join("src");
        if !src.is_dir() {
            continue;
        }
        for file in rust_files(sh, &src)? {
            let text = sh.read_file(&file)?;
            violations.extend(
                library_violations(&text).map(|line| format!("{}:{line}", file.display())),
            );
        }
    }

    if violations.is_empty() {
        return Ok(());
    }
    for violation in &violations {
        println!("    {}", violation.dimmed());
    }
    anyhow::bail!(
        "Found {} unwrap/expect calls in library code",
        violations.len()
    );
}

fn rust_files(sh: &Shell, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in sh.read_dir(dir)? {
        if entry.is_dir() {
            files.extend(rust_files(sh, &entry)?);
        } else if entry.extension().is_some_and(|ext| ext == "rs") {
            files.push(entry);
        }
    }
    Ok(files)
}

/// Line numbers of unwrap/expect calls before the file's test module.
fn library_violations(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && (trimmed.contains(".unwrap()") || trimmed.contains(".expect("))
        })
        .map(|(index, _)| index + 1)
}
