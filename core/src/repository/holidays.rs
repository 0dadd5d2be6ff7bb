use crate::model::calendar::HolidayCalendar;
use crate::repository::file::data_dir;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const HOLIDAY_FILE_NAME: &str = "holidays.json";

/// Reads `<data dir>/holidays.json`:
/// `{ "holidays": ["YYYY-MM-DD", ...], "bayram_starts": ["YYYY-MM-DD", ...] }`.
#[derive(Clone, Debug)]
pub struct FileHolidayRepository {
    file_path: PathBuf,
}

impl FileHolidayRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(HOLIDAY_FILE_NAME);
        Ok(Self { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Result<HolidayCalendar> {
        if self.file_path.exists() {
            let content = fs::read_to_string(&self.file_path)?;
            let calendar: HolidayCalendar = serde_json::from_str(&content)
                .with_context(|| format!("Invalid holiday file {}", self.file_path.display()))?;
            Ok(calendar)
        } else {
            debug!("no holiday file at {}", self.file_path.display());
            Ok(HolidayCalendar::default())
        }
    }

    pub fn save(&self, calendar: &HolidayCalendar) -> Result<()> {
        let content = serde_json::to_string_pretty(calendar)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}
