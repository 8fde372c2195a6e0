use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Owns the bundle stream for exactly one run.
///
/// Every record is `\n\n// ======= <label> =======\n\n` followed by the text.
/// Dropping the writer closes the stream; call [`BundleWriter::finish`] to flush
/// and observe write errors.
pub struct BundleWriter<W: Write> {
    inner: W,
    records: usize,
}

impl BundleWriter<BufWriter<File>> {
    /// Creates or truncates the bundle file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> BundleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    pub fn append_record(&mut self, label: &str, text: &str) -> io::Result<()> {
        write!(self.inner, "\n\n{}\n\n", header_line(label))?;
        self.inner.write_all(text.as_bytes())?;
        self.records += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Header line for `label`, as it appears in the bundle.
pub fn header_line(label: &str) -> String {
    format!("// ======= {label} =======")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_framed_with_header_and_blank_line() {
        let mut writer = BundleWriter::new(Vec::new());
        writer.append_record("src/App.java", "class App {}").unwrap();
        writer.append_record("src/pom.xml", "<project/>").unwrap();
        assert_eq!(writer.records(), 2);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "\n\n// ======= src/App.java =======\n\nclass App {}\
             \n\n// ======= src/pom.xml =======\n\n<project/>"
        );
    }

    #[test]
    fn empty_text_still_gets_a_header() {
        let mut writer = BundleWriter::new(Vec::new());
        writer.append_record("src/Empty.java", "").unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, format!("\n\n{}\n\n", header_line("src/Empty.java")));
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale content from a previous run").unwrap();

        let writer = BundleWriter::create(&path).unwrap();
        writer.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_surface() {
        let mut writer = BundleWriter::new(FailingSink);
        assert!(writer.append_record("a.java", "x").is_err());
        assert_eq!(writer.records(), 0);
    }
}
