//! The 31-field EXTF header record.

use chrono::{Local, NaiveDate};

use crate::config::ExportConfig;

/// Build the header fields for a yearly batch.
///
/// Field layout per the DTVF documentation: format identifier and version,
/// generation timestamp (YYYYMMDDHHMMSSFFF), consultant/client numbers,
/// fiscal year start, batch period bounds, and a handful of flags. The
/// reserved fields stay empty.
pub fn header_fields(year: i32, config: &ExportConfig) -> Vec<String> {
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st exists");
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31st exists");
    let generated_at = Local::now().format("%Y%m%d%H%M%S%3f").to_string();

    vec![
        "EXTF".into(),                                   // 1 Kennzeichen
        "700".into(),                                    // 2 Versionsnummer
        "21".into(),                                     // 3 Formatkategorie
        "Buchungsstapel".into(),                         // 4 Formatname
        "9".into(),                                      // 5 Formatversion
        generated_at,                                    // 6 erzeugt am
        String::new(),                                   // 7 reserviert
        String::new(),                                   // 8 reserviert
        String::new(),                                   // 9 reserviert
        String::new(),                                   // 10 reserviert
        config.consultant_number.to_string(),            // 11 Beraternummer
        config.client_number.to_string(),                // 12 Mandantennummer
        year_start.format("%Y%m%d").to_string(),         // 13 Wirtschaftsjahresbeginn
        config.account_length.to_string(),               // 14 Sachkontenlänge
        year_start.format("%Y%m%d").to_string(),         // 15 Beginn der Periode
        year_end.format("%Y%m%d").to_string(),           // 16 Ende der Periode
        String::new(),                                   // 17 Bezeichnung des Stapels
        config.dictation_mark.clone(),                   // 18 Diktatkürzel
        "1".into(),                                      // 19 Buchungstyp (Finanzbuchführung)
        "0".into(),                                      // 20 Rechnungslegungszweck
        (if config.lock_postings { "1" } else { "0" }).into(), // 21 Festschreibung
        "EUR".into(),                                    // 22 WKZ
        String::new(),                                   // 23 reserviert
        String::new(),                                   // 24 Derivatskennzeichen
        String::new(),                                   // 25 reserviert
        String::new(),                                   // 26 reserviert
        String::new(),                                   // 27 Sachkontenrahmen
        String::new(),                                   // 28 ID der Branchenlösung
        String::new(),                                   // 29 reserviert
        String::new(),                                   // 30 reserviert
        String::new(),                                   // 31 Anwendungsinformation
    ]
}
