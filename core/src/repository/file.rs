use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::{debug, info};

use crate::model::shift::ShiftType;
use crate::repository::codec;
use crate::repository::traits::ScheduleRepository;

const DEFAULT_DIR_NAME: &str = ".nobet";
const DEFAULT_FILE_NAME: &str = "schedule.json";

/// Resolves the data directory, defaulting to `~/.nobet`, and creates it.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DEFAULT_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)
        .with_context(|| format!("Could not create data directory {}", path.display()))?;
    Ok(path)
}

/// Keeps the schedule in `<data dir>/schedule.json`, in the export format.
#[derive(Clone, Debug)]
pub struct FileScheduleRepository {
    file_path: PathBuf,
}

impl FileScheduleRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(DEFAULT_FILE_NAME);
        Ok(FileScheduleRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ScheduleRepository for FileScheduleRepository {
    fn load(&self) -> Result<Vec<(NaiveDate, ShiftType)>> {
        if !self.file_path.exists() {
            debug!("no schedule at {}, starting empty", self.file_path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Could not read {}", self.file_path.display()))?;
        let entries = codec::decode(&content)
            .with_context(|| format!("Could not load schedule from {}", self.file_path.display()))?;
        debug!("loaded {} days from {}", entries.len(), self.file_path.display());
        Ok(entries)
    }

    fn save(&self, entries: &[(NaiveDate, ShiftType)]) -> Result<()> {
        // write next to the target and rename, so a crash never truncates the schedule
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, codec::encode_entries(entries))
            .with_context(|| format!("Could not write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Could not replace {}", self.file_path.display()))?;
        info!("saved {} days to {}", entries.len(), self.file_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().join("nested"))).unwrap();
        assert!(repo.load().unwrap().is_empty());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let entries = vec![(date(2024, 3, 4), ShiftType::Full), (date(2024, 3, 9), ShiftType::Night)];

        repo.save(&entries).unwrap();

        assert_eq!(repo.load().unwrap(), entries);
        let raw = fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"2024-03-04\": \"FULL\""));
        assert!(!dir.path().join("schedule.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.path(), r#"{"2024-03-04": "NIGHTX"}"#).unwrap();
        assert!(repo.load().is_err());
    }
}
