//! constexprify CLI - advisory constexpr suggestions from AST dumps.
//!
//! Feed it one `.ast.json` dump produced by a compiler front end, or a
//! directory tree of them, and it prints `path:line:col: warning: ...`
//! suggestions with machine-applicable insertion fix-its. The program
//! itself is never modified; applying fix-its is a separate step.
//!
//! Exit codes: 0 when analysis ran to completion (with or without
//! suggestions), 2 on front-end or environment failure.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use constexprify_core::{
    init_structured_logging, load_config, print_json, print_plain, Constexprify,
    ConstexprifyConfig, ConstexprifyError,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Advisory constexpr suggestions from compiler AST dumps")]
pub struct Cli {
    /// AST dump file, or a directory to search for .ast.json dumps
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Function-name patterns (regex) to ignore
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Fail on the first unloadable dump instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Directories to exclude from dump discovery
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,
}

/// Directory to look in for constexprify.toml: the input directory itself,
/// or the parent of an input file.
fn config_root(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf()
    }
}

/// CLI flag wins; otherwise the config file's output format decides.
fn use_json(cli_json: bool, cfg: Option<&ConstexprifyConfig>) -> bool {
    if cli_json {
        return true;
    }
    cfg.and_then(|c| c.output.as_ref())
        .and_then(|o| o.format.as_deref())
        .is_some_and(|f| f.eq_ignore_ascii_case("json"))
}

fn run(cli: &Cli) -> Result<()> {
    let input = Path::new(&cli.path);

    // Load config from constexprify.toml if present (safe - don't fail on
    // config errors)
    let mut ignore = cli.ignore.clone();
    let cfg = match load_config(&config_root(input)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[WARN] config load failed: {}", e);
            None
        }
    };
    if let Some(list) = cfg.as_ref().and_then(|c| c.ignore.clone()) {
        ignore.extend(list);
    }

    let result = Constexprify::new(input)
        .ignore_patterns(ignore)
        .exclude_dirs(cli.exclude.iter().cloned())
        .strict(cli.strict)
        .analyze()
        .with_context(|| format!("Failed to analyze: {}", cli.path))?;

    if use_json(cli.json, cfg.as_ref()) {
        print_json(&result.diagnostics);
    } else {
        print_plain(&result.diagnostics);
        eprintln!(
            "[constexprify] {} unit(s), {} function(s) promotable, {} variable(s) promotable",
            result.units, result.functions_promoted, result.variables_suggested
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    // Global panic guard: never leave a half-written diagnostic stream
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] constexprify internal error: {}", info);
        eprintln!("[PANIC] The process will exit safely with code 2.");
    }));

    // Structured JSON logging to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Front-end failures are reported once, distinctly from the
            // advisory diagnostic stream.
            if let Some(fe) = e.downcast_ref::<ConstexprifyError>() {
                eprintln!("[ERROR] {}", fe);
            } else {
                eprintln!("[ERROR] {:#}", e);
            }
            ExitCode::from(2)
        }
    }
}
