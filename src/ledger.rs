//! Lap splits recorded against the engine, plus the CSV flight log.
//!
//! Records are kept in the order they were taken. The lap list wants the
//! newest first, which is a reversed view over the same storage rather than a
//! second ordering maintained in place.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::Snapshot;
use crate::error::ChronosError;
use crate::timefmt::{format_clock, parse_clock};
use crate::Millis;

pub const CSV_HEADER: [&str; 3] = ["Lap", "Interval", "Total"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-based, in order of creation.
    pub sequence: u32,
    /// Time since the previous lap, or since start for the first one.
    pub interval: Millis,
    /// Elapsed time when the lap was taken.
    pub cumulative: Millis,
}

/// One row of the exported table, field names matching the header.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Lap")]
    lap: u32,
    #[serde(rename = "Interval")]
    interval: String,
    #[serde(rename = "Total")]
    total: String,
}

#[derive(Debug, Clone, Default)]
pub struct LapLedger {
    laps: Vec<LapRecord>,
    last_lap_cumulative: Millis,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a split at the snapshot's elapsed time.
    ///
    /// Returns `None` when the clock has never run: not running and nothing
    /// on it.
    pub fn record_lap(&mut self, snapshot: Snapshot) -> Option<LapRecord> {
        if !snapshot.running && snapshot.elapsed == 0.0 {
            debug!("ledger: lap rejected, clock has not started");
            return None;
        }

        let cumulative = snapshot.elapsed;
        let record = LapRecord {
            sequence: self.laps.len() as u32 + 1,
            interval: cumulative - self.last_lap_cumulative,
            cumulative,
        };
        self.last_lap_cumulative = cumulative;
        self.laps.push(record.clone());

        info!(
            "ledger: lap {} recorded (interval {}, total {})",
            record.sequence,
            format_clock(record.interval),
            format_clock(record.cumulative)
        );
        Some(record)
    }

    pub fn clear(&mut self) {
        self.laps.clear();
        self.last_lap_cumulative = 0.0;
    }

    /// Replace the ledger with laps read from a log.
    ///
    /// Sequences must run 1, 2, 3... and totals must never decrease. Intervals
    /// are recomputed from the totals so they keep summing exactly.
    pub fn restore(&mut self, laps: Vec<LapRecord>) -> Result<(), ChronosError> {
        let mut previous = 0.0;
        let mut restored = Vec::with_capacity(laps.len());
        for (i, lap) in laps.into_iter().enumerate() {
            let expected = i as u32 + 1;
            if lap.sequence != expected {
                return Err(ChronosError::InvalidLog(format!(
                    "lap {} found where lap {} was expected",
                    lap.sequence, expected
                )));
            }
            if lap.cumulative < previous {
                return Err(ChronosError::InvalidLog(format!(
                    "lap {} total {} is before the previous total",
                    lap.sequence,
                    format_clock(lap.cumulative)
                )));
            }
            restored.push(LapRecord {
                sequence: lap.sequence,
                interval: lap.cumulative - previous,
                cumulative: lap.cumulative,
            });
            previous = lap.cumulative;
        }

        self.laps = restored;
        self.last_lap_cumulative = previous;
        debug!("ledger: restored {} laps", self.laps.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Oldest first.
    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Newest first, for the lap list.
    pub fn recent_first(&self) -> impl Iterator<Item = &LapRecord> + '_ {
        self.laps.iter().rev()
    }

    /// Header row followed by one row per lap, oldest first.
    ///
    /// Borrowing the ledger, so it can be called again for a fresh pass.
    pub fn to_table(&self) -> impl Iterator<Item = [String; 3]> + '_ {
        let header = CSV_HEADER.map(String::from);
        std::iter::once(header).chain(self.laps.iter().map(|lap| {
            [
                lap.sequence.to_string(),
                format_clock(lap.interval),
                format_clock(lap.cumulative),
            ]
        }))
    }

    /// Serialize `to_table` as comma-separated text, one `\n`-terminated row
    /// per line.
    pub fn to_csv(&self) -> Result<String, ChronosError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        for row in self.to_table() {
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ChronosError::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|_| ChronosError::Utf8)
    }
}

/// Read an exported flight log back into lap records.
///
/// Times come back at centisecond resolution. Rows are returned in file order.
pub fn read_lap_log(csv_content: &str) -> Result<Vec<LapRecord>, ChronosError> {
    let mut reader = csv::Reader::from_reader(csv_content.as_bytes());

    let headers = reader.headers()?;
    if headers.iter().map(str::trim).ne(CSV_HEADER.iter().copied()) {
        return Err(ChronosError::Csv(format!(
            "unexpected header '{}'",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut laps = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let interval = parse_clock(&row.interval).map_err(|e| ChronosError::Time {
            line: i + 2,
            source: e,
        })?;
        let cumulative = parse_clock(&row.total).map_err(|e| ChronosError::Time {
            line: i + 2,
            source: e,
        })?;
        laps.push(LapRecord {
            sequence: row.lap,
            interval,
            cumulative,
        });
    }

    debug!("ledger: read {} laps from log", laps.len());
    Ok(laps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(elapsed: Millis) -> Snapshot {
        Snapshot {
            elapsed,
            running: true,
        }
    }

    #[test]
    fn records_interval_and_total() {
        let mut ledger = LapLedger::new();
        let first = ledger.record_lap(running(2000.0)).unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(first.interval, 2000.0);
        assert_eq!(first.cumulative, 2000.0);

        let second = ledger.record_lap(running(5000.0)).unwrap();
        assert_eq!(second.sequence, 2);
        assert_eq!(second.interval, 3000.0);
        assert_eq!(second.cumulative, 5000.0);
    }

    #[test]
    fn rejects_lap_before_start() {
        let mut ledger = LapLedger::new();
        let idle = Snapshot {
            elapsed: 0.0,
            running: false,
        };
        assert!(ledger.record_lap(idle).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn accepts_lap_while_paused_with_time() {
        let mut ledger = LapLedger::new();
        let paused = Snapshot {
            elapsed: 1234.0,
            running: false,
        };
        assert!(ledger.record_lap(paused).is_some());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn intervals_sum_to_cumulative() {
        let mut ledger = LapLedger::new();
        for t in [312.5, 1000.25, 4400.0, 4400.0, 9001.75] {
            ledger.record_lap(running(t));
        }
        let mut sum = 0.0;
        for lap in ledger.laps() {
            sum += lap.interval;
            assert!((sum - lap.cumulative).abs() < 1e-9);
        }
    }

    #[test]
    fn recent_first_reverses_storage() {
        let mut ledger = LapLedger::new();
        for t in [100.0, 200.0, 300.0] {
            ledger.record_lap(running(t));
        }
        let seq: Vec<u32> = ledger.recent_first().map(|l| l.sequence).collect();
        assert_eq!(seq, vec![3, 2, 1]);
        let seq: Vec<u32> = ledger.laps().iter().map(|l| l.sequence).collect();
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn clear_resets_sequence_and_baseline() {
        let mut ledger = LapLedger::new();
        ledger.record_lap(running(800.0));
        ledger.clear();
        assert!(ledger.is_empty());

        let lap = ledger.record_lap(running(300.0)).unwrap();
        assert_eq!(lap.sequence, 1);
        assert_eq!(lap.interval, 300.0);
    }

    #[test]
    fn empty_table_is_header_only() {
        let ledger = LapLedger::new();
        let rows: Vec<_> = ledger.to_table().collect();
        assert_eq!(rows, vec![CSV_HEADER.map(String::from)]);
    }

    #[test]
    fn table_is_restartable() {
        let mut ledger = LapLedger::new();
        ledger.record_lap(running(61_005.0));
        let a: Vec<_> = ledger.to_table().collect();
        let b: Vec<_> = ledger.to_table().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn csv_matches_flight_log_layout() {
        let mut ledger = LapLedger::new();
        ledger.record_lap(running(2000.0));
        ledger.record_lap(running(61_005.0));
        assert_eq!(
            ledger.to_csv().unwrap(),
            "Lap,Interval,Total\n1,00:02.00,00:02.00\n2,00:59.00,01:01.00\n"
        );
    }

    #[test]
    fn reads_exported_log_back() {
        let mut ledger = LapLedger::new();
        ledger.record_lap(running(2000.0));
        ledger.record_lap(running(5000.0));
        let laps = read_lap_log(&ledger.to_csv().unwrap()).unwrap();
        assert_eq!(laps, ledger.laps().to_vec());
    }

    #[test]
    fn restore_continues_numbering_and_baseline() {
        let mut ledger = LapLedger::new();
        let laps = read_lap_log("Lap,Interval,Total\n1,00:02.00,00:02.00\n2,00:03.00,00:05.00\n").unwrap();
        ledger.restore(laps).unwrap();
        assert_eq!(ledger.len(), 2);

        let next = ledger.record_lap(running(9000.0)).unwrap();
        assert_eq!(next.sequence, 3);
        assert_eq!(next.interval, 4000.0);
    }

    #[test]
    fn restore_rejects_out_of_order_laps() {
        let mut ledger = LapLedger::new();
        ledger.record_lap(running(100.0));
        let gap = read_lap_log("Lap,Interval,Total\n1,00:01.00,00:01.00\n3,00:01.00,00:02.00\n").unwrap();
        assert!(matches!(ledger.restore(gap), Err(ChronosError::InvalidLog(_))));

        let backwards = read_lap_log("Lap,Interval,Total\n1,00:05.00,00:05.00\n2,00:01.00,00:04.00\n").unwrap();
        assert!(matches!(ledger.restore(backwards), Err(ChronosError::InvalidLog(_))));
        // Untouched on failure
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn read_rejects_foreign_header() {
        let err = read_lap_log("Id,Time\n1,00:01.00\n").unwrap_err();
        assert!(matches!(err, ChronosError::Csv(_)));
    }

    #[test]
    fn read_reports_bad_time_with_line() {
        let err = read_lap_log("Lap,Interval,Total\n1,00:02.00,2s\n").unwrap_err();
        assert!(matches!(err, ChronosError::Time { line: 2, .. }));
    }
}
