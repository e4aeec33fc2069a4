use catalog_model::{AuditEntry, AuditLog, CleanAction};

#[test]
fn summary_numbers_entries_in_order() {
    let mut log = AuditLog::new();
    log.push(AuditEntry::new(
        CleanAction::DropDuplicates,
        None,
        2,
        "removed 2 duplicate rows",
    ));
    log.push(AuditEntry::new(
        CleanAction::FillMissing,
        Some("name"),
        1,
        "filled 1 missing value in 'name'",
    ));

    assert_eq!(
        log.summary(),
        "1. [drop_duplicates] removed 2 duplicate rows\n\
         2. [fill_missing] filled 1 missing value in 'name'"
    );
    assert_eq!(log.entries()[1].column.as_deref(), Some("name"));
}

#[test]
fn empty_log_summary() {
    assert_eq!(AuditLog::new().summary(), "no changes recorded");
}

#[test]
fn serializes_as_entry_array() {
    let mut log = AuditLog::new();
    log.push(AuditEntry::new(
        CleanAction::CoerceNumeric,
        Some("price"),
        2,
        "2 values in 'price' could not be parsed, set to 0",
    ));
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json[0]["action"], "coerce_numeric");
    assert_eq!(json[0]["column"], "price");
    assert_eq!(json[0]["affected"], 2);
}
