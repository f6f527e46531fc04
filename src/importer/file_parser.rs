// ==========================================
// Product Import - source readers
// ==========================================
// Formats: CSV (.csv, or no extension) / Excel (.xlsx/.xls)
// First non-empty row is the header; later rows become RawRecords
// keyed by that header. Blank rows are dropped without being emitted.
// ==========================================

use crate::domain::product::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RecordStream};
use calamine::{open_workbook_auto, Data, Reader};
use csv::{ByteRecord, Position, ReaderBuilder, Terminator};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: char = '\u{feff}';

/// Open a file, mapping missing/unreadable into the fatal variants.
fn open_source(path: &Path) -> ImportResult<File> {
    let display = path.display().to_string();
    if path.is_dir() {
        return Err(ImportError::FileReadError(format!("{} is a directory", display)));
    }
    File::open(path).map_err(|e| ImportError::from_open_error(&display, e))
}

/// Trim each header cell; the first one also loses a leading BOM.
fn normalize_headers(cells: Vec<String>) -> Vec<String> {
    cells
        .into_iter()
        .enumerate()
        .map(|(idx, cell)| {
            if idx == 0 {
                cell.trim_start_matches(UTF8_BOM).trim().to_string()
            } else {
                cell.trim().to_string()
            }
        })
        .collect()
}

/// Every cell empty. Whitespace-only cells count as content.
fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|c| c.is_empty())
}

/// Reduce a row to the header's key set: extra cells dropped, missing cells "".
/// A repeated header name keeps the right-most value.
fn keyed_fields(headers: &[String], cells: &[String]) -> HashMap<String, String> {
    let mut fields = HashMap::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let value = cells.get(idx).map(|v| v.trim()).unwrap_or("");
        fields.insert(header.clone(), value.to_string());
    }
    fields
}

/// Cells of one record; the `\r` of a CRLF terminator is dropped.
fn decode_row(record: &ByteRecord) -> Vec<String> {
    let mut cells: Vec<String> = record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();
    if let Some(last) = cells.last_mut() {
        if last.ends_with('\r') {
            last.pop();
        }
    }
    cells
}

// ==========================================
// CsvLineTracker - physical line of each record
// ==========================================
// csv stamps a record's position before skipping empty lines, so
// the start line is derived from the reader position after the read:
// end line - newlines inside quoted cells - the consumed terminator.
// Records end only at '\n'; the last one may end at EOF instead.
struct CsvLineTracker {
    file_len: u64,
    ends_with_newline: bool,
}

impl CsvLineTracker {
    fn inspect(file: &mut File) -> io::Result<Self> {
        let file_len = file.metadata()?.len();
        let mut ends_with_newline = false;
        if file_len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            file.seek(SeekFrom::Start(0))?;
            ends_with_newline = last[0] == b'\n';
        }
        Ok(Self {
            file_len,
            ends_with_newline,
        })
    }

    /// 1-based physical line where the record just read began.
    fn start_line(&self, after_read: &Position, record: &ByteRecord) -> u64 {
        let embedded: u64 = record
            .iter()
            .map(|field| field.iter().filter(|&&b| b == b'\n').count() as u64)
            .sum();
        let terminated = after_read.byte() < self.file_len || self.ends_with_newline;
        after_read
            .line()
            .saturating_sub(embedded + u64::from(terminated))
    }
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn open(&self, file_path: &Path) -> ImportResult<RecordStream> {
        let mut file = open_source(file_path)?;
        let lines = CsvLineTracker::inspect(&mut file).map_err(|e| {
            ImportError::FileReadError(format!("{}: {}", file_path.display(), e))
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // ragged rows are padded/truncated, not rejected
            .terminator(Terminator::Any(b'\n'))
            .from_reader(file);

        // Header: first non-blank row
        let mut record = ByteRecord::new();
        let mut header_line = 0u64;
        let mut headers = Vec::new();
        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) => {
                    let cells = decode_row(&record);
                    if is_blank_row(&cells) {
                        continue;
                    }
                    header_line = lines.start_line(reader.position(), &record);
                    headers = normalize_headers(cells);
                    break;
                }
                Ok(false) => break,
                Err(e) => return Err(e.into()),
            }
        }

        debug!(
            source = %file_path.display(),
            columns = headers.len(),
            header_line,
            "CSV header read"
        );

        Ok(Box::new(CsvRecordIter {
            reader,
            lines,
            headers,
            header_line,
            record,
            exhausted: false,
        }))
    }
}

/// Lazy row iterator over an open CSV reader.
struct CsvRecordIter {
    reader: csv::Reader<File>,
    lines: CsvLineTracker,
    headers: Vec<String>,
    header_line: u64,
    record: ByteRecord,
    exhausted: bool,
}

impl Iterator for CsvRecordIter {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        if self.exhausted || self.headers.is_empty() {
            return None;
        }
        loop {
            match self.reader.read_byte_record(&mut self.record) {
                Ok(true) => {
                    let cells = decode_row(&self.record);
                    if is_blank_row(&cells) {
                        continue;
                    }
                    let line = self.lines.start_line(self.reader.position(), &self.record);
                    let line_number = line.saturating_sub(self.header_line) as usize;
                    return Some(RawRecord::new(
                        line_number,
                        keyed_fields(&self.headers, &cells),
                    ));
                }
                Ok(false) => {
                    self.exhausted = true;
                    return None;
                }
                Err(e) => {
                    // Mid-stream I/O failure: keep what was read so far
                    warn!(error = %e, "CSV read aborted, remaining rows dropped");
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}

// ==========================================
// Excel Parser
// ==========================================
// Reads the first worksheet. calamine loads the sheet eagerly;
// rows are still handed out one at a time.
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn open(&self, file_path: &Path) -> ImportResult<RecordStream> {
        // Surface NotFound/PermissionDenied before calamine wraps them
        drop(open_source(file_path)?);

        let mut workbook = open_workbook_auto(file_path)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => {
                warn!(source = %file_path.display(), "workbook has no worksheets");
                return Ok(Box::new(std::iter::empty()));
            }
        };

        let mut rows = range
            .rows()
            .enumerate()
            .map(|(idx, row)| (idx, row.iter().map(Data::to_string).collect::<Vec<_>>()))
            .filter(|(_, cells)| !is_blank_row(cells));

        let Some((header_idx, header_cells)) = rows.next() else {
            return Ok(Box::new(std::iter::empty()));
        };
        let headers = normalize_headers(header_cells);

        let records: Vec<RawRecord> = rows
            .map(|(idx, cells)| RawRecord::new(idx - header_idx, keyed_fields(&headers, &cells)))
            .collect();

        debug!(
            source = %file_path.display(),
            columns = headers.len(),
            rows = records.len(),
            "worksheet read"
        );

        Ok(Box::new(records.into_iter()))
    }
}

// ==========================================
// Universal parser (dispatch by extension)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn open(&self, file_path: &Path) -> ImportResult<RecordStream> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "" | "csv" => CsvParser.open(file_path),
            "xlsx" | "xls" => ExcelParser.open(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
