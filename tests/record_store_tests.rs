mod common;
use chrono::NaiveDate;
use common::{path_in, read_lines, temp_dir};
use std::fs;
use triplogger::core::{RecordStore, SchemaStatus};
use triplogger::errors::AppError;
use triplogger::models::{Schema, TripRecord};

fn trip(date: &str, location: &str, miles: &str, reason: Option<&str>) -> TripRecord {
    TripRecord::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        location,
        miles,
        reason.map(str::to_string),
    )
}

#[test]
fn test_ensure_schema_creates_then_unchanged() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let store = RecordStore::new(Schema::Current);

    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Created);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Date,Location,Miles,Trip Reason\n"
    );
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Unchanged);
    assert_eq!(read_lines(&path).len(), 1);
}

#[test]
fn test_ensure_schema_creates_missing_directories() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "a/b/c/trips.csv");
    let store = RecordStore::new(Schema::Current);

    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Created);
    assert!(dir.path().join("a/b/c/trips.csv").is_file());
}

#[test]
fn test_ensure_schema_rejects_empty_path() {
    let store = RecordStore::new(Schema::Current);
    assert!(matches!(store.ensure_schema(""), Err(AppError::InvalidPath(_))));
    assert!(matches!(store.ensure_schema("   "), Err(AppError::InvalidPath(_))));
}

#[test]
fn test_ensure_schema_rejects_directory() {
    let dir = temp_dir();
    let store = RecordStore::new(Schema::Current);
    let path = dir.path().to_string_lossy().to_string();
    assert!(matches!(store.ensure_schema(&path), Err(AppError::InvalidPath(_))));
}

#[test]
fn test_ensure_schema_reports_directory_error() {
    let dir = temp_dir();
    let blocker = path_in(dir.path(), "not_a_dir");
    fs::write(&blocker, "x").unwrap();
    let store = RecordStore::new(Schema::Current);

    let err = store
        .ensure_schema(&format!("{}/trips.csv", blocker))
        .unwrap_err();
    assert!(matches!(err, AppError::Directory { .. }), "got {err:?}");
}

#[test]
fn test_legacy_header_is_migrated() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(&path, "Date,Location,Number\n2023-01-01,Buckeye,7\n").unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Date,Location,Miles,Trip Reason\n2023-01-01,Buckeye,7,\n"
    );
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Unchanged);
}

#[test]
fn test_migration_keeps_every_row_and_its_columns() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let old_rows = [
        "2023-01-01,Buckeye,7",
        "2023-01-02,\"Baker, CA\",3",
        "2023-01-03,505,5",
        "2023-01-04,Somewhere,twelve",
    ];
    fs::write(
        &path,
        format!("Date,Location,Number\n{}\n", old_rows.join("\n")),
    )
    .unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);

    let lines = read_lines(&path);
    assert_eq!(lines[0], "Date,Location,Miles,Trip Reason");
    assert_eq!(lines.len(), old_rows.len() + 1);
    for (old, new) in old_rows.iter().zip(&lines[1..]) {
        assert_eq!(new, &format!("{old},"));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .unwrap();
    for rec in rdr.records() {
        assert_eq!(rec.unwrap().len(), 4);
    }
}

#[test]
fn test_migration_pads_short_and_truncates_long_rows() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(
        &path,
        "Date,Location\n2023-01-01,X\n2023-01-02,Y,3,r,extra\n",
    )
    .unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    assert_eq!(
        read_lines(&path),
        vec![
            "Date,Location,Miles,Trip Reason",
            "2023-01-01,X,,",
            "2023-01-02,Y,3,r",
        ]
    );
}

#[test]
fn test_misnamed_trailing_column_is_migrated() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(&path, "Date,Location,Miles,Notes\n2023-01-01,X,1,n\n").unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    assert_eq!(
        read_lines(&path),
        vec!["Date,Location,Miles,Trip Reason", "2023-01-01,X,1,n"]
    );
}

#[test]
fn test_empty_file_gets_header() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(&path, "").unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Date,Location,Miles,Trip Reason\n"
    );
}

#[test]
fn test_current_file_is_left_untouched() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let content = "Date,Location,Miles,Trip Reason\n2024-01-01,505,5,delivery\n2024-01-02,Buckeye,7,\n";
    fs::write(&path, content).unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Unchanged);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_append_writes_expected_row() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let store = RecordStore::new(Schema::Current);
    store.ensure_schema(&path).unwrap();

    store
        .append(&path, &trip("2024-01-01", "505", "5", Some("delivery")))
        .unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines[0], "Date,Location,Miles,Trip Reason");
    assert_eq!(lines[1], "2024-01-01,505,5,delivery");
}

#[test]
fn test_appends_are_kept_in_call_order() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let store = RecordStore::new(Schema::Current);
    store.ensure_schema(&path).unwrap();

    store.append(&path, &trip("2024-02-01", "505", "5", None)).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();
    store
        .append(&path, &trip("2024-02-02", "Buckeye", "7", Some("")))
        .unwrap();
    store
        .append(&path, &trip("2024-02-03", "Baker/Edwards/HR", "1", Some("meeting")))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&after_first));
    assert_eq!(
        read_lines(&path),
        vec![
            "Date,Location,Miles,Trip Reason",
            "2024-02-01,505,5,",
            "2024-02-02,Buckeye,7,",
            "2024-02-03,Baker/Edwards/HR,1,meeting",
        ]
    );
}

#[test]
fn test_append_quotes_special_characters() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let store = RecordStore::new(Schema::Current);
    store.ensure_schema(&path).unwrap();

    store
        .append(
            &path,
            &trip("2024-03-01", "Baker, \"HR\"", "2.5", Some("drop off, pick up")),
        )
        .unwrap();

    assert_eq!(
        read_lines(&path)[1],
        "2024-03-01,\"Baker, \"\"HR\"\"\",2.5,\"drop off, pick up\""
    );
}

#[test]
fn test_append_without_file_fails_and_creates_nothing() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "missing.csv");
    let store = RecordStore::new(Schema::Current);

    let err = store
        .append(&path, &trip("2024-01-01", "505", "5", None))
        .unwrap_err();
    assert!(matches!(err, AppError::Append { .. }), "got {err:?}");
    assert!(err.is_data_file_error());
    assert!(!dir.path().join("missing.csv").exists());
}

#[test]
fn test_legacy_schema_writes_three_columns() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let store = RecordStore::new(Schema::Legacy);

    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Created);
    store
        .append(&path, &trip("2023-05-05", "Buckeye", "7", Some("ignored")))
        .unwrap();

    assert_eq!(
        read_lines(&path),
        vec!["Date,Location,Number", "2023-05-05,Buckeye,7"]
    );
}

#[test]
fn test_missing_final_newline_is_repaired_before_append() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(&path, "Date,Location,Miles,Trip Reason\n2024-01-01,505,5,delivery").unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    store.append(&path, &trip("2024-01-02", "Buckeye", "7", None)).unwrap();

    assert_eq!(
        read_lines(&path),
        vec![
            "Date,Location,Miles,Trip Reason",
            "2024-01-01,505,5,delivery",
            "2024-01-02,Buckeye,7,",
        ]
    );
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Unchanged);
}

#[test]
fn test_header_only_file_without_newline() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(&path, "Date,Location,Miles,Trip Reason").unwrap();

    let store = RecordStore::new(Schema::Current);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    store.append(&path, &trip("2024-01-01", "505", "5", Some("x"))).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Date,Location,Miles,Trip Reason\n2024-01-01,505,5,x\n"
    );
}

#[test]
fn test_legacy_schema_refuses_newer_file() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    let content = "Date,Location,Miles,Trip Reason\n2024-01-01,505,5,delivery\n";
    fs::write(&path, content).unwrap();

    let store = RecordStore::new(Schema::Legacy);
    let err = store.ensure_schema(&path).unwrap_err();
    assert!(matches!(err, AppError::NewerLayout { .. }), "got {err:?}");
    assert!(err.is_data_file_error());
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_legacy_schema_still_fixes_unrelated_header() {
    let dir = temp_dir();
    let path = path_in(dir.path(), "trips.csv");
    fs::write(&path, "When,Where\n2023-01-01,X\n").unwrap();

    let store = RecordStore::new(Schema::Legacy);
    assert_eq!(store.ensure_schema(&path).unwrap(), SchemaStatus::Migrated);
    assert_eq!(
        read_lines(&path),
        vec!["Date,Location,Number", "2023-01-01,X,"]
    );
}

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    // Root ignores file modes, so these checks only mean something for
    // ordinary users.
    fn running_as_root() -> bool {
        unsafe { libc::geteuid() == 0 }
    }

    fn set_mode(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_read_only_file_is_file_access_error() {
        if running_as_root() {
            return;
        }
        let dir = temp_dir();
        let path = path_in(dir.path(), "trips.csv");
        fs::write(&path, "Date,Location,Miles,Trip Reason\n").unwrap();
        set_mode(Path::new(&path), 0o444);

        let err = RecordStore::new(Schema::Current)
            .ensure_schema(&path)
            .unwrap_err();
        set_mode(Path::new(&path), 0o644);

        assert!(matches!(err, AppError::FileAccess { .. }), "got {err:?}");
        assert!(err.is_data_file_error());
    }

    #[test]
    fn test_unreadable_file_is_file_access_error() {
        if running_as_root() {
            return;
        }
        let dir = temp_dir();
        let path = path_in(dir.path(), "trips.csv");
        fs::write(&path, "Date,Location,Miles,Trip Reason\n").unwrap();
        set_mode(Path::new(&path), 0o000);

        let err = RecordStore::new(Schema::Current)
            .ensure_schema(&path)
            .unwrap_err();
        set_mode(Path::new(&path), 0o644);

        assert!(matches!(err, AppError::FileAccess { .. }), "got {err:?}");
    }

    #[test]
    fn test_read_only_directory_is_file_create_error() {
        if running_as_root() {
            return;
        }
        let dir = temp_dir();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        set_mode(&locked, 0o555);

        let path = locked.join("trips.csv").to_string_lossy().to_string();
        let err = RecordStore::new(Schema::Current)
            .ensure_schema(&path)
            .unwrap_err();
        set_mode(&locked, 0o755);

        assert!(matches!(err, AppError::FileCreate { .. }), "got {err:?}");
        assert!(!locked.join("trips.csv").exists());
    }
}
