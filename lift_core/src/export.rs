//! CSV export of logged sets.

use crate::{Result, TrainingSet};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    exercise: &'a str,
    date: &'a str,
    weight: f64,
    reps: f64,
    e1rm: f64,
}

impl<'a> From<&'a TrainingSet> for CsvRow<'a> {
    fn from(set: &'a TrainingSet) -> Self {
        CsvRow {
            id: &set.id,
            exercise: &set.exercise,
            date: &set.date,
            weight: set.weight,
            reps: set.reps,
            e1rm: set.e1rm,
        }
    }
}

/// Write `sets` to a CSV file at `path`, replacing any existing file.
///
/// The file is written to a temp file beside `path` and renamed into
/// place, so readers never see a half-written export. Returns the number
/// of rows written.
pub fn write_csv(sets: &[TrainingSet], path: &Path) -> Result<usize> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(temp.as_file());

        if sets.is_empty() {
            writer.write_record(["id", "exercise", "date", "weight", "reps", "e1rm"])?;
        }
        for set in sets {
            writer.serialize(CsvRow::from(set))?;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| crate::Error::Io(e.error))?;

    tracing::info!("Exported {} sets to {:?}", sets.len(), path);
    Ok(sets.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("exports").join("sets.csv");

        let sets = vec![
            TrainingSet::new("Squat", "2024-01-01", 100.0, 5.0),
            TrainingSet::new("Bench Press, paused", "2024-01-02", 70.0, 8.0),
        ];
        let count = write_csv(&sets, &csv_path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "exercise", "date", "weight", "reps", "e1rm"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], sets[0].id.as_str());
        assert_eq!(&rows[1][1], "Bench Press, paused");
        assert_eq!(rows[0][5].parse::<f64>().unwrap(), 112.5);
    }

    #[test]
    fn test_write_csv_empty_has_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("empty.csv");

        assert_eq!(write_csv(&[], &csv_path).unwrap(), 0);
        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(contents.trim(), "id,exercise,date,weight,reps,e1rm");
    }

    #[test]
    fn test_write_csv_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("sets.csv");
        std::fs::write(&csv_path, "stale contents\n").unwrap();

        write_csv(&[TrainingSet::new("Squat", "2024-01-01", 100.0, 5.0)], &csv_path).unwrap();
        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert!(!contents.contains("stale"));
        assert_eq!(contents.lines().count(), 2);
    }
}
