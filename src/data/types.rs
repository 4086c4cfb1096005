use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum InputPath {
    Stdin,
    File(PathBuf),
}

impl InputPath {
    pub fn display_name(&self) -> String {
        match self {
            InputPath::Stdin => "stdin".to_string(),
            InputPath::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// One coordinate string given on the command line.
    Single(String),
    /// One coordinate string per line.
    File(InputPath),
}

impl DataSource {
    pub fn uses_stdin(&self) -> bool {
        matches!(self, DataSource::File(InputPath::Stdin))
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, DataSource::File(_))
    }
}

/// A raw coordinate string and where it came from (`path:line` for files).
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub text: String,
    pub origin: Option<String>,
}

pub type InputResult = Result<InputRecord, String>;
pub type InputStream = Box<dyn Iterator<Item = InputResult>>;
