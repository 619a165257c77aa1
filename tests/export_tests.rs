use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use kassenwart::config::{
    AccountMapping, AccountTable, DateRange, ExportConfig, TaxAccount, TaxRegistry,
};
use kassenwart::datev::{TaxKey, UstKey};
use kassenwart::export_year;
use kassenwart::ledger::{LedgerEntry, MemorySource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn out_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kassenwart-test-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn accounts() -> AccountTable {
    AccountTable::new(vec![AccountMapping::new("Hauptkonto", 920)])
}

/// 19% output tax, suspended during the 2020 H2 rate cut.
fn registry() -> TaxRegistry {
    TaxRegistry::new(vec![TaxAccount {
        account: 9660,
        name: "Umsatzsteuer 19%".into(),
        rate: 19,
        key: TaxKey::Ust(UstKey::K19),
        active_ranges: vec![
            DateRange::new(date(2007, 1, 1), date(2020, 6, 30)),
            DateRange::new(date(2021, 1, 1), date(2030, 12, 31)),
        ],
    }])
    .unwrap()
}

fn entry(id: i64, booking_type: i64, amount: Decimal, on: NaiveDate, text: &str) -> LedgerEntry {
    LedgerEntry {
        id,
        account_id: 1,
        booking_type,
        group_key: "4711".into(),
        amount,
        date: on,
        text: text.into(),
        split_type: None,
    }
}

/// Booking type 1 = revenue account 2100, 3 = the 19% tax account.
fn source(entries: Vec<LedgerEntry>) -> MemorySource {
    MemorySource::new(
        entries,
        [(1, 2100u32), (3, 9660)].into_iter().collect(),
        [(1, "Hauptkonto".to_string())].into_iter().collect(),
    )
}

fn export(year: i32, entries: Vec<LedgerEntry>, tag: &str) -> String {
    let mut src = source(entries);
    let dir = out_dir(tag);
    let path = export_year(
        year,
        &mut src,
        &ExportConfig::default(),
        &registry(),
        &accounts(),
        &dir,
    )
    .unwrap();
    fs::read_to_string(path).unwrap()
}

// ---------------------------------------------------------------------------
// File-level structure
// ---------------------------------------------------------------------------

#[test]
fn file_name_encodes_the_year() {
    let mut src = source(vec![entry(1, 1, dec!(10.00), date(2023, 3, 1), "Spende")]);
    let dir = out_dir("name");
    let path = export_year(
        2023,
        &mut src,
        &ExportConfig::default(),
        &registry(),
        &accounts(),
        &dir,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "datev_export_2023.csv");
    // No temp file left behind.
    assert!(!dir.join("datev_export_2023.csv.tmp").exists());
}

#[test]
fn header_for_2023_carries_period_bounds() {
    let content = export(
        2023,
        vec![entry(1, 1, dec!(10.00), date(2023, 3, 1), "Spende")],
        "header",
    );
    let header = content.lines().next().unwrap();
    let fields: Vec<&str> = header.split(';').collect();
    assert_eq!(fields.len(), 31);
    assert_eq!(fields[0], "EXTF");
    assert_eq!(fields[1], "700");
    assert_eq!(fields[2], "21");
    assert_eq!(fields[3], "Buchungsstapel");
    assert_eq!(fields[14], "20230101");
    assert_eq!(fields[15], "20231231");
}

#[test]
fn second_line_lists_all_124_columns() {
    let content = export(
        2023,
        vec![entry(1, 1, dec!(10.00), date(2023, 3, 1), "Spende")],
        "columns",
    );
    let columns = content.lines().nth(1).unwrap();
    let names: Vec<&str> = columns.split(';').collect();
    assert_eq!(names.len(), 124);
    assert_eq!(names[0], "Umsatz");
    assert_eq!(names[6], "Konto");
    assert_eq!(names[7], "Gegenkonto (ohne BU-Schlüssel)");
    assert_eq!(names[114], "Leistungsdatum");
    assert_eq!(names[115], "Datum Zuord. Steuerperiode");
    assert_eq!(names[123], "EU-Steuersatz (Ursprung)");
}

#[test]
fn output_uses_crlf() {
    let content = export(
        2023,
        vec![entry(1, 1, dec!(10.00), date(2023, 3, 1), "Spende")],
        "crlf",
    );
    assert!(content.contains("\r\n"));
    let without_cr = content.replace("\r\n", "");
    assert!(!without_cr.contains('\n'), "found bare LF without CR");
}

// ---------------------------------------------------------------------------
// Active-period booking
// ---------------------------------------------------------------------------

#[test]
fn taxed_booking_in_active_period_yields_one_gross_row() {
    let content = export(
        2023,
        vec![
            entry(1, 1, dec!(100.00), date(2023, 6, 15), "Beitrag"),
            entry(2, 3, dec!(19.00), date(2023, 6, 15), "Beitrag USt"),
        ],
        "active",
    );
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3, "header + columns + one data row");
    let fields: Vec<&str> = lines[2].split(';').collect();
    assert_eq!(fields[0], "119,00");
    assert_eq!(fields[2], "EUR");
    assert_eq!(fields[6], "2100");
    assert_eq!(fields[7], "920");
    assert_eq!(fields[8], "3");
    assert_eq!(fields[9], "1506");
    assert_eq!(fields[10], "4711");
    assert_eq!(fields[13], "Beitrag");
    assert_eq!(fields[114], "");
    assert_eq!(fields[115], "");
}

// ---------------------------------------------------------------------------
// Retroactive booking (2020 H2 rate-cut window)
// ---------------------------------------------------------------------------

#[test]
fn retroactive_booking_yields_split_pair() {
    let content = export(
        2020,
        vec![
            entry(1, 1, dec!(100.00), date(2020, 7, 15), "Beitrag"),
            entry(2, 3, dec!(19.00), date(2020, 7, 15), "Beitrag USt"),
        ],
        "retro",
    );
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4, "header + columns + primary + offset");

    let header: Vec<&str> = lines[0].split(';').collect();
    assert_eq!(header[14], "20200101");
    assert_eq!(header[15], "20201231");

    let primary: Vec<&str> = lines[2].split(';').collect();
    assert_eq!(primary[0], "119,00");
    // Key valid at the prior active end (2020-06-30), not at the booking date.
    assert_eq!(primary[8], "3");
    assert_eq!(primary[114], "30062020");
    assert_eq!(primary[115], "15072020");
    assert_eq!(primary[6], "2100");
    assert_eq!(primary[7], "99999", "creditor clearing account");

    let offset: Vec<&str> = lines[3].split(';').collect();
    assert_eq!(offset[0], "119,00");
    assert_eq!(offset[8], "", "offset row carries no BU key");
    assert_eq!(offset[13], "Ausgleich - Beitrag");
    assert_eq!(offset[6], "920");
    assert_eq!(offset[7], "99999");
    assert_eq!(offset[114], "");
    assert_eq!(offset[115], "");
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

#[test]
fn entries_of_other_years_are_not_exported() {
    let content = export(
        2023,
        vec![
            entry(1, 1, dec!(10.00), date(2023, 3, 1), "Spende"),
            entry(2, 1, dec!(99.00), date(2022, 3, 1), "Spende Vorjahr"),
        ],
        "scope",
    );
    assert_eq!(content.lines().count(), 3);
    assert!(!content.contains("Vorjahr"));
}

#[test]
fn zero_amount_entries_produce_no_rows() {
    let content = export(
        2023,
        vec![
            entry(1, 1, dec!(0.00), date(2023, 3, 1), "Storno"),
            entry(2, 1, dec!(10.00), date(2023, 3, 2), "Spende"),
        ],
        "zero",
    );
    assert_eq!(content.lines().count(), 3);
    assert!(!content.contains("Storno"));
}
