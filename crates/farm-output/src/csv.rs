//! CSV output backend.  Creates `farm_stats.csv` in the output directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::StatsWriter;
use crate::{OutputResult, StatsRow};

pub const FILE_NAME: &str = "farm_stats.csv";

/// Writes one CSV line per statistics sample.
pub struct StatsCsvWriter {
    out:      Writer<File>,
    path:     PathBuf,
    rows:     u64,
    finished: bool,
}

impl StatsCsvWriter {
    /// Create `dir` if needed, open `farm_stats.csv` in it, and write the
    /// header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(FILE_NAME);
        let mut out = Writer::from_path(&path)?;
        out.write_record(StatsRow::header())?;
        Ok(Self { out, path, rows: 0, finished: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl StatsWriter for StatsCsvWriter {
    fn write_row(&mut self, row: &StatsRow) -> OutputResult<()> {
        self.out.write_record(row.fields())?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
