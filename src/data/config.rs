use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRECISION: usize = 6;
pub const MAX_PRECISION: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
    #[cfg(feature = "parquet")]
    Parquet,
}

#[cfg(feature = "parquet")]
const FORMAT_NAMES: &[&str] = &["text", "csv", "json", "parquet"];
#[cfg(not(feature = "parquet"))]
const FORMAT_NAMES: &[&str] = &["text", "csv", "json"];

impl OutputFormat {
    pub fn all() -> &'static [&'static str] {
        FORMAT_NAMES
    }

    /// Columnar formats carry parsed coordinates only.
    pub fn is_columnar(&self) -> bool {
        match self {
            #[cfg(feature = "parquet")]
            OutputFormat::Parquet => true,
            _ => false,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            #[cfg(feature = "parquet")]
            "parquet" => Ok(OutputFormat::Parquet),
            #[cfg(not(feature = "parquet"))]
            "parquet" => Err("PARQUET format not available in this build".to_string()),
            _ => Err(format!(
                "Invalid format: {}. Supported formats: {}",
                s,
                OutputFormat::all().join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            #[cfg(feature = "parquet")]
            OutputFormat::Parquet => "parquet",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub headers: bool,
    pub show_inputs: Option<bool>,
    pub show_formats: bool,
    pub precision: usize,
}

impl OutputOptions {
    pub fn should_show_inputs(&self) -> bool {
        self.show_inputs.unwrap_or(false)
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            headers: true,
            show_inputs: None,
            show_formats: false,
            precision: DEFAULT_PRECISION,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parameters {
    pub output: OutputOptions,
    pub strict: bool,
    pub skip_invalid: bool,
    pub perf: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Parse,
    Validate,
}

impl Command {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "parse" => Some(Command::Parse),
            "validate" => Some(Command::Validate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_is_case_insensitive() {
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("Json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    }

    #[test]
    fn test_unknown_output_format() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Invalid format: xml"));
        assert!(err.contains("csv"));
    }

    #[test]
    fn test_defaults() {
        let params = Parameters::default();
        assert_eq!(params.output.format, OutputFormat::Text);
        assert!(params.output.headers);
        assert!(!params.output.should_show_inputs());
        assert_eq!(params.output.precision, 6);
        assert!(!params.strict);
    }

    #[test]
    fn test_command_words() {
        assert_eq!(Command::from_word("parse"), Some(Command::Parse));
        assert_eq!(Command::from_word("validate"), Some(Command::Validate));
        assert_eq!(Command::from_word("59.3"), None);
    }
}
