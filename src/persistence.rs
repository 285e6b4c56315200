//! File I/O for saving and loading solve statistics.
//!
//! Binary format (little endian):
//! - u32: total solves
//! - u32: move count of the last solve
//! - u64: best time in milliseconds (`u64::MAX` if none)
//! - u64: last time in milliseconds (`u64::MAX` if none)
//! - u64: average time in milliseconds
//!
//! A human-readable summary is written next to the binary file with a `.txt`
//! extension.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::stats::{format_optional_time, Stats};

const NO_TIME: u64 = u64::MAX;

/// Saves stats in both binary and text form.
pub fn save(stats: &Stats, path: &Path) -> std::io::Result<()> {
    save_text(stats, &path.with_extension("txt"))?;
    let mut file = BufWriter::new(File::create(path)?);
    write_binary(stats, &mut file)?;
    file.flush()
}

/// Saves a human-readable summary.
fn save_text(stats: &Stats, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{}", format_summary(stats))
}

/// Renders the summary shown by the `stats` command and saved as text.
pub fn format_summary(stats: &Stats) -> String {
    format!(
        "Total solves: {}\nBest time: {}\nLast solve: {}\nAverage time: {}\nLast move count: {}\n",
        stats.total_solves,
        format_optional_time(stats.best_time),
        format_optional_time(stats.last_time),
        format_optional_time(stats.average()),
        stats.last_move_count,
    )
}

fn time_to_millis(time: Option<Duration>) -> u64 {
    time.map_or(NO_TIME, |t| (t.as_millis() as u64).min(NO_TIME - 1))
}

fn millis_to_time(millis: u64) -> Option<Duration> {
    (millis != NO_TIME).then(|| Duration::from_millis(millis))
}

/// Writes stats in the binary format.
pub fn write_binary<W: Write>(stats: &Stats, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(&stats.total_solves.to_le_bytes())?;
    writer.write_all(&stats.last_move_count.to_le_bytes())?;
    writer.write_all(&time_to_millis(stats.best_time).to_le_bytes())?;
    writer.write_all(&time_to_millis(stats.last_time).to_le_bytes())?;
    writer.write_all(&time_to_millis(Some(stats.average_time)).to_le_bytes())?;
    Ok(())
}

/// Reads stats in the binary format. Returns `None` on truncated input.
pub fn read_binary<R: Read>(reader: &mut R) -> Option<Stats> {
    let mut u32_buffer = [0u8; 4];
    let mut u64_buffer = [0u8; 8];

    reader.read_exact(&mut u32_buffer).ok()?;
    let total_solves = u32::from_le_bytes(u32_buffer);
    reader.read_exact(&mut u32_buffer).ok()?;
    let last_move_count = u32::from_le_bytes(u32_buffer);

    let mut read_time = || -> Option<Option<Duration>> {
        reader.read_exact(&mut u64_buffer).ok()?;
        Some(millis_to_time(u64::from_le_bytes(u64_buffer)))
    };
    let best_time = read_time()?;
    let last_time = read_time()?;
    let average_time = read_time()?.unwrap_or_default();

    Some(Stats {
        best_time,
        last_time,
        average_time,
        total_solves,
        last_move_count,
    })
}

/// Loads stats from the binary file, or `None` if it is missing or
/// unreadable.
pub fn load(path: &Path) -> Option<Stats> {
    let file = File::open(path).ok()?;
    read_binary(&mut BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stats {
        let mut stats = Stats::default();
        stats.record_solve(Duration::from_millis(42_500), 57);
        stats.record_solve(Duration::from_millis(38_250), 49);
        stats
    }

    #[test]
    fn test_binary_layout_size() {
        let mut bytes = vec![];
        write_binary(&sample(), &mut bytes).unwrap();
        assert_eq!(bytes.len(), 4 + 4 + 8 + 8 + 8);
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
    }

    #[test]
    fn test_fresh_stats_keep_missing_times() {
        let mut bytes = vec![];
        write_binary(&Stats::default(), &mut bytes).unwrap();
        let loaded = read_binary(&mut bytes.as_slice()).unwrap();
        assert_eq!(loaded, Stats::default());
    }

    #[test]
    fn test_truncated_input_is_rejected() {
        let mut bytes = vec![];
        write_binary(&sample(), &mut bytes).unwrap();
        bytes.truncate(12);
        assert_eq!(read_binary(&mut bytes.as_slice()), None);
    }

    #[test]
    fn test_save_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.bin");
        let stats = sample();

        save(&stats, &path).unwrap();
        assert_eq!(load(&path), Some(stats));

        let text = std::fs::read_to_string(dir.path().join("stats.txt")).unwrap();
        assert!(text.contains("Total solves: 2"));
        assert!(text.contains("Best time: 00:38.25"));
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("absent.bin")), None);
    }

    #[test]
    fn test_summary() {
        insta::assert_snapshot!(format_summary(&sample()), @r"
        Total solves: 2
        Best time: 00:38.25
        Last solve: 00:38.25
        Average time: 00:40.37
        Last move count: 49
        ");
    }
}
