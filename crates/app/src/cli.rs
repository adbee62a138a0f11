//! Command-line parsing.

use std::path::PathBuf;

/// Usage text printed by `--help` and after argument errors.
pub const USAGE: &str = "\
Usage: rulecheck lint [--hooks <name,...>] <file>...

Validates rule-set documents (.json, .yaml, .yml) without running them.

Options:
  --hooks <names>  Comma-separated hook names treated as registered
  -h, --help       Print this help
  -V, --version    Print the version";

/// Errors from argument parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    /// No subcommand was given.
    #[error("missing command")]
    MissingCommand,

    /// The subcommand is not known.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The flag is not known.
    #[error("unknown option '{0}'")]
    UnknownFlag(String),

    /// A flag that takes a value was last.
    #[error("option '{0}' requires a value")]
    MissingValue(String),

    /// `lint` was given no documents.
    #[error("no files to lint")]
    NoFiles,
}

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Lint the given documents.
    Lint(LintArgs),
    /// Print usage.
    Help,
    /// Print the version.
    Version,
}

/// Arguments of `rulecheck lint`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintArgs {
    /// Hook names rules may refer to.
    pub hooks: Vec<String>,
    /// Documents to lint, in order.
    pub files: Vec<PathBuf>,
}

/// Parses the arguments following the program name.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown commands or flags, a flag missing its
/// value, or a `lint` without files.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    let command = args.next().ok_or(CliError::MissingCommand)?;
    match command.as_str() {
        "-h" | "--help" | "help" => return Ok(Command::Help),
        "-V" | "--version" => return Ok(Command::Version),
        "lint" => {}
        _ => return Err(CliError::UnknownCommand(command)),
    }

    let mut lint = LintArgs::default();
    while let Some(arg) = args.next() {
        if let Some(names) = arg.strip_prefix("--hooks=") {
            lint.hooks.extend(split_names(names));
            continue;
        }

        match arg.as_str() {
            "--hooks" => {
                let names = args
                    .next()
                    .ok_or_else(|| CliError::MissingValue("--hooks".to_string()))?;
                lint.hooks.extend(split_names(&names));
            }
            "-h" | "--help" => return Ok(Command::Help),
            "--" => lint.files.extend(args.by_ref().map(PathBuf::from)),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError::UnknownFlag(flag.to_string()));
            }
            path => lint.files.push(PathBuf::from(path)),
        }
    }

    if lint.files.is_empty() {
        return Err(CliError::NoFiles);
    }

    Ok(Command::Lint(lint))
}

fn split_names(names: &str) -> impl Iterator<Item = String> + '_ {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
