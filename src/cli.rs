//! Command-line parsing and validation.

use crate::data::config::MAX_PRECISION;
use crate::data::{Command, DataSource, InputPath, OutputFormat, Parameters};
use crate::error::CliError;
use std::collections::HashSet;
use std::path::PathBuf;

type CliResult<T> = Result<T, CliError>;

type ApplyFn = fn(Option<&str>, &mut Parameters) -> CliResult<()>;

enum OptKind {
    Value(ApplyFn),
    Flag(ApplyFn),
}

struct OptionSpec {
    name: &'static str,
    kind: OptKind,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        name: "format",
        kind: OptKind::Value(|value, params| {
            let v = required_value("format", value)?;
            params.output.format = v.parse::<OutputFormat>().map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "precision",
        kind: OptKind::Value(|value, params| {
            let v = required_value("precision", value)?;
            let precision = v
                .parse::<usize>()
                .ok()
                .filter(|p| *p <= MAX_PRECISION)
                .ok_or_else(|| {
                    CliError::from(format!(
                        "Invalid precision value: {} (expected 0 to {})",
                        v, MAX_PRECISION
                    ))
                })?;
            params.output.precision = precision;
            Ok(())
        }),
    },
    OptionSpec {
        name: "headers",
        kind: OptKind::Flag(|_, params| {
            params.output.headers = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-headers",
        kind: OptKind::Flag(|_, params| {
            params.output.headers = false;
            Ok(())
        }),
    },
    OptionSpec {
        name: "show-inputs",
        kind: OptKind::Flag(|_, params| {
            params.output.show_inputs = Some(true);
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-show-inputs",
        kind: OptKind::Flag(|_, params| {
            params.output.show_inputs = Some(false);
            Ok(())
        }),
    },
    OptionSpec {
        name: "show-formats",
        kind: OptKind::Flag(|_, params| {
            params.output.show_formats = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "strict",
        kind: OptKind::Flag(|_, params| {
            params.strict = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "skip-invalid",
        kind: OptKind::Flag(|_, params| {
            params.skip_invalid = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "perf",
        kind: OptKind::Flag(|_, params| {
            params.perf = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "verbose",
        kind: OptKind::Flag(|_, params| {
            params.verbose = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "help",
        kind: OptKind::Flag(|_, _| Err(CliError::Exit(get_help_text()))),
    },
    OptionSpec {
        name: "version",
        kind: OptKind::Flag(|_, _| Err(CliError::Exit(get_version_text()))),
    },
];

pub fn parse_cli(args: Vec<String>) -> CliResult<(DataSource, Command, Parameters)> {
    if args.len() < 2 {
        return Err(CliError::Exit(
            "Usage: coordparse [OPTIONS] <coordinate...|@file> [parse|validate]".to_string(),
        ));
    }

    let mut params = Parameters::default();
    let mut positional = Vec::new();
    let mut applied_options: HashSet<&'static str> = HashSet::new();

    for arg in args.into_iter().skip(1) {
        if let Some(stripped) = arg.strip_prefix("--") {
            let (name, value) = stripped
                .split_once('=')
                .map(|(n, v)| (n, Some(v)))
                .unwrap_or((stripped, None));
            apply_option(name, value, &mut params, &mut applied_options)?;
        } else {
            positional.push(arg);
        }
    }

    if let Some(first) = positional.first()
        && first == "help"
    {
        let message = positional
            .get(1)
            .map(|command| get_command_help(command))
            .unwrap_or_else(get_help_text);
        return Err(CliError::Exit(message));
    }

    let (command, data_source) = parse_positional_args(&positional)?;

    validate_command_options(command, &params, &applied_options)?;

    if params.output.show_inputs.is_none() {
        params.output.show_inputs = Some(data_source.is_batch());
    }

    Ok((data_source, command, params))
}

fn apply_option(
    name: &str,
    value: Option<&str>,
    params: &mut Parameters,
    applied: &mut HashSet<&'static str>,
) -> CliResult<()> {
    let Some(spec) = OPTION_SPECS.iter().find(|s| s.name == name) else {
        return Err(format!("Unknown option: --{}", name).into());
    };

    match spec.kind {
        OptKind::Value(handler) => {
            let val = required_value(spec.name, value)?;
            handler(Some(val), params)?;
        }
        OptKind::Flag(handler) => {
            if value.is_some() {
                return Err(format!("Option --{} does not take a value", spec.name).into());
            }
            handler(None, params)?;
        }
    }

    applied.insert(spec.name);
    Ok(())
}

fn required_value<'a>(flag: &'static str, value: Option<&'a str>) -> CliResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::from(format!("Option --{} requires a value", flag)))
}

fn parse_file_arg(arg: &str) -> CliResult<InputPath> {
    let Some(stripped) = arg.strip_prefix('@') else {
        return Err("Not a file argument".into());
    };

    if stripped == "-" {
        return Ok(InputPath::Stdin);
    }

    if stripped.is_empty() {
        return Err("Missing file name after '@'".into());
    }

    Ok(InputPath::File(PathBuf::from(stripped)))
}

fn parse_positional_args(positional_args: &[String]) -> CliResult<(Command, DataSource)> {
    let (command, data_args) = match positional_args.split_last() {
        Some((last, rest)) => match Command::from_word(last) {
            Some(command) => (command, rest),
            None => (Command::Parse, positional_args),
        },
        None => (Command::Parse, positional_args),
    };

    if let Some(misplaced) = data_args
        .iter()
        .find(|arg| Command::from_word(arg).is_some())
    {
        return Err(format!("Command '{}' must come after the coordinate", misplaced).into());
    }

    if data_args.is_empty() {
        return Err("Need a coordinate or a file argument (@file or @-)".into());
    }

    Ok((command, parse_data_source(data_args)?))
}

fn parse_data_source(args: &[String]) -> CliResult<DataSource> {
    match args {
        [single] if single.starts_with('@') => Ok(DataSource::File(parse_file_arg(single)?)),
        _ if args.iter().any(|arg| arg.starts_with('@')) => {
            Err("A file argument (@file or @-) cannot be combined with other arguments".into())
        }
        _ => Ok(DataSource::Single(args.join(" "))),
    }
}

fn get_version_text() -> String {
    format!(
        "coordparse {}\n Build: {} ({})\n Built: {}\n Features: {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_DATE"),
        env!("BUILD_FEATURES")
    )
}

fn validate_command_options(
    command: Command,
    params: &Parameters,
    applied: &HashSet<&'static str>,
) -> CliResult<()> {
    if command == Command::Validate {
        if applied.contains("show-formats") {
            return Err("Option --show-formats not valid for validate command".into());
        }
        if applied.contains("skip-invalid") {
            return Err("Option --skip-invalid not valid for validate command".into());
        }
        if applied.contains("precision") {
            return Err("Option --precision not valid for validate command".into());
        }
        if params.output.format.is_columnar() {
            return Err(format!(
                "{} format not valid for validate command",
                params.output.format.to_string().to_uppercase()
            )
            .into());
        }
    }

    Ok(())
}

fn get_help_text() -> String {
    let defaults = Parameters::default();
    let formats = OutputFormat::all().join(", ");
    format!(
        r#"coordparse {}
Converts free-form coordinate strings to decimal latitude and longitude.

Usage:
  coordparse [OPTIONS] <coordinate...> [parse|validate]
  coordparse [OPTIONS] @coords.txt [parse|validate]
  coordparse [OPTIONS] @- [parse|validate]

Examples:
  coordparse 59.3346 N 18.0632 E
  coordparse "59°20'4.56\"S 18°3'47.52\"W"
  coordparse N591234E181234 --format=json
  coordparse @coords.txt --format=csv --show-formats
  echo "5920.076N 01803.792E" | coordparse @- validate

Arguments:
  <coordinate...>    Coordinate text. Several words are joined with spaces.
                       59.3346 18.0632          decimal degrees
                       59 20.076 N 18 3.792 E   degrees and minutes
                       59 20 4.56 18 3 47.52    degrees, minutes, seconds
                       5920.076N 01803.792E     packed DDMM.mmm
                       N591234E181234           packed DDMMSS
                       S and W negate latitude and longitude.

  @coords.txt        File with one coordinate per line (or @- for stdin).
                       Blank lines and lines starting with # are ignored.

Options:
  --format=<format>     Output format: {}. Default: {}
  --[no-]headers        Include headers in CSV output. Default: {}
  --[no-]show-inputs    Include the input text in output. Auto-enabled for
                        file and stdin input.
  --show-formats        Include the detected format of each axis.
  --precision=<digits>  Decimal places in text and CSV output. Default: {}
  --strict              Reject results outside -90..90 / -180..180.
  --skip-invalid        Skip invalid inputs instead of stopping (parse).
  --perf                Print performance statistics to stderr.
  --verbose             Print debug logging to stderr (see also RUST_LOG).
  --help                Show this help message and exit.
  --version             Print version information and exit.

Commands:
  parse                 Convert to decimal degrees (default).
  validate              Check inputs without converting them.

Run 'coordparse help <command>' for command-specific details.
"#,
        env!("CARGO_PKG_VERSION"),
        formats,
        defaults.output.format,
        defaults.output.headers,
        defaults.output.precision
    )
}

fn get_command_help(command: &str) -> String {
    match command {
        "parse" => r#"Usage:
  coordparse [OPTIONS] <coordinate...> [parse]
  coordparse [OPTIONS] @coords.txt [parse]

Converts each input to decimal latitude and longitude. Processing stops at
the first invalid input unless --skip-invalid is given.

Options:
  --show-formats            Include the detected format of each axis
                            (plain, dm, dms, ms).
  --precision=<digits>      Decimal places in text and CSV output.
  --skip-invalid            Log and skip invalid inputs.
  --strict                  Treat out-of-range results as invalid.

Examples:
  coordparse 59.3346 S 18.0632 W
  coordparse @coords.txt --format=csv --skip-invalid
"#
        .to_string(),
        "validate" => r#"Usage:
  coordparse [OPTIONS] <coordinate...> validate
  coordparse [OPTIONS] @coords.txt validate

Reports whether each input is a valid coordinate. Exits with status 1 if
any input is invalid.

Options:
  --strict                  Treat out-of-range results as invalid.

Examples:
  coordparse 59S18S validate
  coordparse @coords.txt validate --format=json
"#
        .to_string(),
        _ => format!(
            "Unknown command: {}\n\nRun 'coordparse --help' for usage.",
            command
        ),
    }
}
