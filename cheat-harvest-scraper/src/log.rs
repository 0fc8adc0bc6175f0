use std::path::Path;

/// A single entry in the harvest log.
#[derive(Debug, Clone)]
pub enum LogEntry {
    Harvested {
        title_id: String,
        title_name: String,
        builds: usize,
        cheats: usize,
        /// Files or archives that could not be written
        warnings: Vec<String>,
    },
    NoCheats {
        title_id: String,
        title_name: String,
    },
    Failed {
        title_id: String,
        title_name: String,
        message: String,
    },
    /// An id or query from the selection that matched no catalog title.
    Unmatched { query: String },
}

/// Collects per-title results and writes a log file.
#[derive(Debug, Default)]
pub struct HarvestLog {
    entries: Vec<LogEntry>,
}

impl HarvestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Harvested {
                    builds,
                    cheats,
                    warnings,
                    ..
                } => {
                    summary.harvested += 1;
                    summary.builds += builds;
                    summary.cheats += cheats;
                    summary.warnings += warnings.len();
                }
                LogEntry::NoCheats { .. } => summary.no_cheats += 1,
                LogEntry::Failed { .. } => summary.failed += 1,
                LogEntry::Unmatched { .. } => summary.unmatched += 1,
            }
        }
        summary
    }

    /// File name for a log written now, e.g. `harvest-log-20240501-120000.txt`.
    pub fn default_file_name() -> String {
        format!(
            "harvest-log-{}.txt",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        )
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Harvest Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Harvested: {} ({} builds, {} cheats)",
            summary.harvested, summary.builds, summary.cheats
        )?;
        writeln!(file, "No cheats: {}", summary.no_cheats)?;
        writeln!(file, "Failed: {}", summary.failed)?;
        writeln!(file, "Unmatched: {}", summary.unmatched)?;
        writeln!(file, "Write warnings: {}", summary.warnings)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Harvested {
                    title_id,
                    title_name,
                    builds,
                    cheats,
                    warnings,
                } => {
                    writeln!(
                        file,
                        "[OK] {} \"{}\": {} build(s), {} cheat(s)",
                        title_id, title_name, builds, cheats
                    )?;
                    for w in warnings {
                        writeln!(file, "     Warning: {}", w)?;
                    }
                }
                LogEntry::NoCheats {
                    title_id,
                    title_name,
                } => {
                    writeln!(file, "[NO CHEATS] {} \"{}\"", title_id, title_name)?;
                }
                LogEntry::Failed {
                    title_id,
                    title_name,
                    message,
                } => {
                    writeln!(file, "[ERROR] {} \"{}\": {}", title_id, title_name, message)?;
                }
                LogEntry::Unmatched { query } => {
                    writeln!(file, "[UNMATCHED] {}", query)?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub harvested: usize,
    pub no_cheats: usize,
    pub failed: usize,
    pub unmatched: usize,
    pub builds: usize,
    pub cheats: usize,
    pub warnings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HarvestLog {
        let mut log = HarvestLog::new();
        log.add(LogEntry::Harvested {
            title_id: "0100000000010000".into(),
            title_name: "Super Mario Odyssey".into(),
            builds: 2,
            cheats: 7,
            warnings: vec!["could not write Moon Jump".into()],
        });
        log.add(LogEntry::Harvested {
            title_id: "0100152000022000".into(),
            title_name: "Mario Kart 8 Deluxe".into(),
            builds: 1,
            cheats: 3,
            warnings: vec![],
        });
        log.add(LogEntry::NoCheats {
            title_id: "01007EF00011E000".into(),
            title_name: "Breath of the Wild".into(),
        });
        log.add(LogEntry::Failed {
            title_id: "0100ABCD00000000".into(),
            title_name: "Broken".into(),
            message: "HTTP 500".into(),
        });
        log.add(LogEntry::Unmatched {
            query: "metroid".into(),
        });
        log
    }

    #[test]
    fn summary_counts_each_kind() {
        assert_eq!(
            sample().summary(),
            LogSummary {
                harvested: 2,
                no_cheats: 1,
                failed: 1,
                unmatched: 1,
                builds: 3,
                cheats: 10,
                warnings: 1,
            }
        );
    }

    #[test]
    fn written_log_lists_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HarvestLog::default_file_name());
        sample().write_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== Harvest Log ==="));
        assert!(text.contains("Harvested: 2 (3 builds, 10 cheats)"));
        assert!(text.contains("[OK] 0100000000010000 \"Super Mario Odyssey\": 2 build(s), 7 cheat(s)"));
        assert!(text.contains("     Warning: could not write Moon Jump"));
        assert!(text.contains("[NO CHEATS] 01007EF00011E000"));
        assert!(text.contains("[ERROR] 0100ABCD00000000 \"Broken\": HTTP 500"));
        assert!(text.contains("[UNMATCHED] metroid"));
    }

    #[test]
    fn default_file_name_shape() {
        let name = HarvestLog::default_file_name();
        assert!(name.starts_with("harvest-log-"));
        assert!(name.ends_with(".txt"));
    }
}
