use std::{
    fmt::Write as _,
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Destination of a JSON report; `-` selects stdout.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: &Path) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        tracing::info!(output = %output.display_path(), "saved JSON report");
        Ok(())
    }

    pub fn from_output_path(output_path: &Path) -> anyhow::Result<Self> {
        if is_stdout_path(output_path) {
            Ok(Output::stdout())
        } else {
            Output::open(output_path.to_owned())
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

fn is_stdout_path(path: &Path) -> bool {
    path == Path::new("-")
}

/// Whether the JSON report goes to stdout, in which case stdout carries
/// nothing else.
pub fn json_to_stdout(output: Option<&Path>) -> bool {
    output.is_some_and(is_stdout_path)
}

/// Formats values as a wrapped, comma-separated list with `per_line` values
/// per line.
pub fn format_values(values: &[f64], per_line: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in values.chunks(per_line.max(1)).enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        for (j, value) in chunk.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            write!(out, "{value:.2}").unwrap();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_dash_selects_stdout() {
        let output = Output::from_output_path(Path::new("-")).unwrap();
        assert_eq!(output.display_path(), "stdout");
    }

    #[test]
    fn test_json_to_stdout_only_for_dash() {
        assert!(json_to_stdout(Some(Path::new("-"))));
        assert!(!json_to_stdout(Some(Path::new("report.json"))));
        assert!(!json_to_stdout(None));
    }

    #[test]
    fn test_save_json_to_file() {
        let path = std::env::temp_dir().join(format!("statlab-util-{}.json", std::process::id()));
        Output::save_json(&serde_json::json!({ "mean": 170.5 }), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["mean"], 170.5);
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_format_values_wraps_lines() {
        assert_eq!(format_values(&[], 3), "");
        assert_eq!(format_values(&[1.0, 2.5], 3), "  1.00, 2.50");
        assert_eq!(
            format_values(&[1.0, 2.0, 3.0, 4.0], 3),
            "  1.00, 2.00, 3.00,\n  4.00"
        );
    }
}
