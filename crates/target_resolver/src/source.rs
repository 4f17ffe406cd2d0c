//! Where raw target strings come from

use portprint_common::PortprintResult;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::info;

/// Origin of the raw `host:port` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// Targets given directly on the command line.
    List(Vec<String>),
    /// Newline-delimited targets in a file.
    File(PathBuf),
    /// Newline-delimited targets on standard input.
    Stdin,
}

impl TargetSource {
    /// Explicit targets win; otherwise the input file, otherwise stdin.
    #[must_use]
    pub fn select(targets: Vec<String>, list: Option<PathBuf>) -> Self {
        if !targets.is_empty() {
            Self::List(targets)
        } else if let Some(path) = list {
            Self::File(path)
        } else {
            Self::Stdin
        }
    }

    /// Collect the raw target strings. Any read error is fatal.
    pub fn read_lines(self) -> PortprintResult<Vec<String>> {
        match self {
            Self::List(targets) => Ok(targets),
            Self::File(path) => {
                let file = File::open(&path)?;
                Ok(read_target_lines(BufReader::new(file))?)
            }
            Self::Stdin => Ok(read_stdin(io::stdin().lock())?),
        }
    }
}

fn read_stdin<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    info!("Reading targets from stdin");
    read_target_lines(reader)
}

/// Read one target per line, trimming surrounding whitespace.
///
/// Lines are decoded lossily so a line of garbage bytes becomes a bad entry
/// for the resolver to drop instead of failing the whole read.
pub fn read_target_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedLogs;
    use std::io::{Cursor, Read, Write};
    use tracing::Level;

    #[test]
    fn test_select_precedence() {
        let targets = vec!["10.0.0.1:22".to_string()];
        assert_eq!(
            TargetSource::select(targets.clone(), Some(PathBuf::from("in.txt"))),
            TargetSource::List(targets)
        );
        assert_eq!(
            TargetSource::select(Vec::new(), Some(PathBuf::from("in.txt"))),
            TargetSource::File(PathBuf::from("in.txt"))
        );
        assert_eq!(TargetSource::select(Vec::new(), None), TargetSource::Stdin);
    }

    #[test]
    fn test_read_lines_trims() {
        let input = Cursor::new("10.0.0.1:22\r\n  example.com:80 \n\n10.0.0.2:443");
        let lines = read_target_lines(input).unwrap();
        assert_eq!(lines, vec!["10.0.0.1:22", "example.com:80", "", "10.0.0.2:443"]);
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10.0.0.1:22").unwrap();
        writeln!(file, "badtarget").unwrap();

        let lines = TargetSource::File(file.path().to_path_buf()).read_lines().unwrap();
        assert_eq!(lines, vec!["10.0.0.1:22", "badtarget"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(TargetSource::File(missing).read_lines().is_err());
    }

    #[test]
    fn test_invalid_utf8_line_is_kept_as_entry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"10.0.0.1:22\n\xff\xfe:80\n10.0.0.2:443\n").unwrap();

        let lines = TargetSource::File(file.path().to_path_buf()).read_lines().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "10.0.0.1:22");
        assert_eq!(lines[1], "\u{fffd}\u{fffd}:80");
        assert_eq!(lines[2], "10.0.0.2:443");
    }

    #[test]
    fn test_stdin_notice_logged_once() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber(Level::INFO));

        let lines = read_stdin(Cursor::new("10.0.0.1:22\n10.0.0.2:443\n")).unwrap();
        assert_eq!(lines, vec!["10.0.0.1:22", "10.0.0.2:443"]);
        assert_eq!(logs.contents().matches("Reading targets from stdin").count(), 1);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn test_read_error_surfaces() {
        let err = read_target_lines(BufReader::new(Broken)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
