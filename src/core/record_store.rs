//! CSV persistence for trip records.
//!
//! The data file is append-only from the application's point of view. The
//! only time existing content is rewritten is a header migration, which
//! keeps every data row and pads or truncates it to the schema width.

use crate::errors::{AppError, AppResult};
use crate::models::{Schema, TripRecord};
use csv::{ByteRecord, ReaderBuilder, Terminator, WriterBuilder};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of [`RecordStore::ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Created,
    Migrated,
    Unchanged,
}

impl SchemaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaStatus::Created => "created",
            SchemaStatus::Migrated => "migrated",
            SchemaStatus::Unchanged => "unchanged",
        }
    }
}

/// Owns the layout of the data file; the path itself is supplied per call.
#[derive(Debug, Clone, Copy)]
pub struct RecordStore {
    schema: Schema,
}

impl RecordStore {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Make sure `path` exists and starts with this store's header,
    /// creating parent directories and migrating an outdated header.
    pub fn ensure_schema(&self, path: &str) -> AppResult<SchemaStatus> {
        if path.trim().is_empty() {
            return Err(AppError::InvalidPath(path.to_string()));
        }
        let file = Path::new(path);
        if file.is_dir() {
            return Err(AppError::InvalidPath(path.to_string()));
        }

        if let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AppError::Directory {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let status = if file.exists() {
            self.inspect(file)?
        } else {
            self.create(file)?;
            SchemaStatus::Created
        };

        OpenOptions::new()
            .append(true)
            .open(file)
            .map_err(|e| file_access(file, e))?;

        debug!("data file {} {}", path, status.as_str());
        Ok(status)
    }

    /// Append one record as a single row write.
    pub fn append(&self, path: &str, record: &TripRecord) -> AppResult<()> {
        let append_err = |e: io::Error| AppError::Append {
            path: path.to_string(),
            reason: e.to_string(),
        };

        let line = encode_rows(&[record.to_row(self.schema)]).map_err(append_err)?;

        // No `create`: a missing file means ensure_schema was skipped or the
        // file vanished, and a headerless file must not be produced.
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(append_err)?;
        file.write_all(&line).map_err(append_err)?;
        file.flush().map_err(append_err)?;

        info!("trip appended to {}: {} / {}", path, record.location, record.miles);
        Ok(())
    }

    fn create(&self, file: &Path) -> AppResult<()> {
        let create_err = |e: io::Error| AppError::FileCreate {
            path: file.display().to_string(),
            reason: e.to_string(),
        };

        let header = encode_rows(&[self.schema.headers()]).map_err(create_err)?;
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(file)
            .map_err(create_err)?;
        out.write_all(&header).map_err(create_err)?;
        out.flush().map_err(create_err)?;
        Ok(())
    }

    fn inspect(&self, file: &Path) -> AppResult<SchemaStatus> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(file)
            .map_err(|e| file_access(file, e.into()))?;

        let mut records = reader.byte_records();
        let header = match records.next() {
            None => {
                fs::write(file, encode_rows(&[self.schema.headers()])?)
                    .map_err(|e| file_access(file, e))?;
                info!("empty data file {} given a header", file.display());
                return Ok(SchemaStatus::Migrated);
            }
            Some(rec) => rec.map_err(|e| file_access(file, e.into()))?,
        };

        let names: Vec<String> = header
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect();
        if self.schema.accepts_header(names.as_slice()) {
            if ends_with_newline(file).map_err(|e| file_access(file, e))? {
                return Ok(SchemaStatus::Unchanged);
            }
            // Without a terminator the next append would join the last line.
            OpenOptions::new()
                .append(true)
                .open(file)
                .and_then(|mut f| f.write_all(b"\n"))
                .map_err(|e| file_access(file, e))?;
            info!("missing line terminator added to {}", file.display());
            return Ok(SchemaStatus::Migrated);
        }
        if self.schema.header_is_newer(names.as_slice()) {
            return Err(AppError::NewerLayout {
                path: file.display().to_string(),
                found: names.join(","),
            });
        }

        let rows = records
            .collect::<Result<Vec<ByteRecord>, csv::Error>>()
            .map_err(|e| file_access(file, e.into()))?;
        drop(reader);
        self.rewrite(file, &rows)?;

        info!(
            "data file {} migrated from {:?} to {:?} ({} rows)",
            file.display(),
            names,
            self.schema.headers(),
            rows.len()
        );
        Ok(SchemaStatus::Migrated)
    }

    /// Replace `file` with the current header followed by `rows`, each
    /// padded with empty fields or truncated to the schema width.
    fn rewrite(&self, file: &Path, rows: &[ByteRecord]) -> AppResult<()> {
        let n = self.schema.columns();
        let mut body: Vec<Vec<&[u8]>> = Vec::with_capacity(rows.len() + 1);
        body.push(self.schema.headers().iter().map(|h| h.as_bytes()).collect());
        for rec in rows {
            let mut fields: Vec<&[u8]> = rec.iter().take(n).collect();
            fields.resize(n, b"");
            body.push(fields);
        }
        let bytes = encode_rows(&body)?;

        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let create_err = |e: io::Error| AppError::FileCreate {
            path: file.display().to_string(),
            reason: e.to_string(),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(create_err)?;
        tmp.write_all(&bytes).map_err(create_err)?;
        tmp.flush().map_err(create_err)?;
        if let Ok(meta) = fs::metadata(file) {
            fs::set_permissions(tmp.path(), meta.permissions()).map_err(create_err)?;
        }
        tmp.persist(file).map_err(|e| file_access(file, e.error))?;
        Ok(())
    }
}

fn ends_with_newline(file: &Path) -> io::Result<bool> {
    let mut f = File::open(file)?;
    if f.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    f.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    f.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn file_access(file: &Path, e: io::Error) -> AppError {
    AppError::FileAccess {
        path: file.display().to_string(),
        reason: e.to_string(),
    }
}

/// Encode rows as newline-terminated CSV with minimal quoting.
fn encode_rows<R, F>(rows: &[R]) -> io::Result<Vec<u8>>
where
    R: AsRef<[F]>,
    F: AsRef<[u8]>,
{
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row.as_ref())?;
    }
    wtr.into_inner().map_err(|e| io::Error::other(e.to_string()))
}
