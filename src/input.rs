use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Why an input that feeds a degradable panel could not be used.
#[derive(Debug)]
pub enum InputError {
    /// The file does not exist or could not be opened.
    Absent { path: PathBuf, source: io::Error },
    /// The file was opened but a line could not be interpreted.
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    /// The file holds no data rows.
    Empty { path: PathBuf },
}

impl InputError {
    pub fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        InputError::Malformed {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InputError::Absent { .. } => "absent",
            InputError::Malformed { .. } => "malformed",
            InputError::Empty { .. } => "empty",
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::Absent { path, source } => {
                write!(f, "could not open {}: {}", path.display(), source)
            }
            InputError::Malformed { path, line, reason } => {
                write!(f, "{}:{}: {}", path.display(), line, reason)
            }
            InputError::Empty { path } => write!(f, "{} contains no data", path.display()),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Absent { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Open a text input, mapping open failures to `InputError::Absent`.
pub fn open_input(path: &Path) -> Result<BufReader<File>, InputError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| InputError::Absent {
            path: path.to_path_buf(),
            source,
        })
}

/// Iterate over the non-blank lines of `reader` with their 1-based line numbers.
/// Read failures part way through are reported as malformed input.
pub fn numbered_lines<'a, R: BufRead + 'a>(
    reader: R,
    path: &'a Path,
) -> impl Iterator<Item = Result<(usize, String), InputError>> + 'a {
    reader
        .lines()
        .enumerate()
        .filter_map(move |(i, line)| match line {
            Ok(l) if l.trim().is_empty() => None,
            Ok(l) => Some(Ok((i + 1, l))),
            Err(e) => Some(Err(InputError::malformed(path, i + 1, e.to_string()))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_absent() {
        let err = open_input(Path::new("/nonexistent/covdot/depth.txt")).unwrap_err();
        assert_eq!(err.kind(), "absent");
        assert!(err.to_string().contains("depth.txt"));
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        let data = "a\n\n  \nb\n";
        let path = Path::new("mem");
        let lines: Vec<_> = numbered_lines(data.as_bytes(), path)
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(lines, vec![(1, "a".to_string()), (4, "b".to_string())]);
    }
}
