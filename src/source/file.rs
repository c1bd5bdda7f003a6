//! Values read from a text file.

use super::{NumberSource, SourceError};
use std::path::{Path, PathBuf};

/// Reads numbers separated by whitespace or commas.
///
/// Blank lines and anything after `#` on a line are ignored. The file is
/// re-read on every batch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parses the textual contents of a number file.
    pub fn parse(content: &str) -> Result<Vec<f64>, SourceError> {
        let mut values = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let data = line.split('#').next().unwrap_or_default();
            for token in data
                .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
                .filter(|t| !t.is_empty())
            {
                let value = token.parse::<f64>().map_err(|_| SourceError::Parse {
                    line: index + 1,
                    token: token.to_owned(),
                })?;
                values.push(value);
            }
        }

        Ok(values)
    }
}

impl NumberSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn next_batch(&mut self) -> Result<Vec<f64>, SourceError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| SourceError::FileRead {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        let values = Self::parse(&content)?;

        tracing::debug!(path = %self.path.display(), count = values.len(), "Read numbers");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let content = "0.06141, 0.72484\n0.94107;0.56766\n\n  0.14411  # last one\n";
        assert_eq!(
            FileSource::parse(content).unwrap(),
            vec![0.06141, 0.72484, 0.94107, 0.56766, 0.14411]
        );
    }

    #[test]
    fn test_parse_comment_only() {
        assert!(FileSource::parse("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_reports_line() {
        assert_eq!(
            FileSource::parse("0.1\n0.2 abc\n"),
            Err(SourceError::Parse {
                line: 2,
                token: "abc".into()
            })
        );
    }

    #[test]
    fn test_missing_file() {
        let mut source = FileSource::new("/nonexistent/poker-test/numbers.txt");
        assert!(matches!(
            source.next_batch(),
            Err(SourceError::FileRead { .. })
        ));
    }

    #[test]
    fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("poker-test-{}.txt", std::process::id()));
        std::fs::write(&path, "0.5 0.25\n").unwrap();

        let mut source = FileSource::new(&path);
        let values = source.next_batch();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(values.unwrap(), vec![0.5, 0.25]);
    }
}
