//! Reads and writes a built tablebase as a flat text file.
//!
//! Grounded on the original retrograde-analysis implementation's `output.csv`
//! writer in `run_engine.cpp` and the corresponding reader loop in
//! `get_next_move.cpp`: one line per position, `"<depth> <placement> <side>"`,
//! where `<placement> <side>` is exactly a [`crate::tablebase::codec`] key.
//! Line order within a depth is unspecified and never relied upon.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::tablebase::error::{Result, TablebaseError};
use crate::tablebase::Tablebase;

/// Writes `layers` to `path`, one line per position.
///
/// # Errors
///
/// Returns [`TablebaseError::Persistence`] if `path` cannot be created or
/// written to.
pub fn write(layers: &Tablebase, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (depth, layer) in layers.iter().enumerate() {
        for key in layer {
            writeln!(writer, "{depth} {key}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads a tablebase previously written by [`write`].
///
/// # Errors
///
/// Returns [`TablebaseError::Persistence`] if `path` cannot be opened or read,
/// or [`TablebaseError::MalformedPosition`] if a line cannot be parsed.
pub fn read(path: &Path) -> Result<Tablebase> {
    let reader = BufReader::new(File::open(path)?);
    let mut layers: Tablebase = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let (depth, key) = line.split_once(' ').ok_or_else(|| TablebaseError::MalformedPosition {
            key: line.clone(),
            reason: "expected '<depth> <placement> <side>'".to_string(),
        })?;
        let depth: usize = depth.parse().map_err(|_| TablebaseError::MalformedPosition {
            key: line.clone(),
            reason: format!("'{depth}' is not a valid depth"),
        })?;
        if depth >= layers.len() {
            layers.resize_with(depth + 1, Default::default);
        }
        let _ = layers[depth].insert(key.to_string());
    }
    Ok(layers)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::{read, write};

    /// A path under the system temp directory private to one test, so
    /// parallel test execution never collides.
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("zugzwang-persistence-test-{name}-{:?}", std::thread::current().id()))
    }

    #[test]
    fn round_trips_layers() {
        let mut layer0 = HashSet::new();
        let _ = layer0.insert("4k3/Q7/5K2/8/8/8/8/8 b".to_string());
        let mut layer1 = HashSet::new();
        let _ = layer1.insert("4k3/8/5K2/8/Q7/8/8/8 w".to_string());
        let layers = vec![layer0, layer1];

        let path = temp_path("round-trip");
        write(&layers, &path).unwrap();
        let read_back = read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read_back, layers);
    }

    #[test]
    fn rejects_malformed_lines() {
        let path = temp_path("malformed");
        std::fs::write(&path, "not-a-depth 4k3/Q7/5K2/8/8/8/8/8 b\n").unwrap();
        let result = read(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
