use chrono::NaiveDate;
use kassenwart::config::{
    AccountMapping, AccountTable, DateRange, ExportConfigBuilder, TaxAccount, TaxRegistry,
};
use kassenwart::datev::{TaxKey, UstKey};
use kassenwart::export_year;
use kassenwart::ledger::{LedgerEntry, MemorySource};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() {
    // Static configuration, normally loaded from a config file.
    let accounts = AccountTable::new(vec![
        AccountMapping::new("Hauptkonto", 920),
        AccountMapping::new("Barkasse", 921),
    ]);
    let registry = TaxRegistry::new(vec![TaxAccount {
        account: 9650,
        name: "Umsatzsteuer Zweckbetrieb 7%".into(),
        rate: 7,
        key: TaxKey::Ust(UstKey::K7),
        active_ranges: vec![
            DateRange::new(date(2007, 1, 1), date(2020, 6, 30)),
            DateRange::new(date(2021, 1, 1), date(2030, 12, 31)),
        ],
    }])
    .expect("valid tax registry");

    // A taxed membership fee: net row plus its tax split on one voucher.
    let net = LedgerEntry {
        id: 1,
        account_id: 1,
        booking_type: 10,
        group_key: "2023-0042".into(),
        amount: dec!(100.00),
        date: date(2023, 6, 15),
        text: "Beitrag Sommerfest".into(),
        split_type: None,
    };
    let tax = LedgerEntry {
        id: 2,
        booking_type: 20,
        amount: dec!(7.00),
        text: "Beitrag Sommerfest USt 7%".into(),
        ..net.clone()
    };
    let donation = LedgerEntry {
        id: 3,
        account_id: 1,
        booking_type: 11,
        group_key: "2023-0043".into(),
        amount: dec!(50.00),
        date: date(2023, 7, 1),
        text: "Spende".into(),
        split_type: None,
    };

    let mut source = MemorySource::new(
        vec![net, tax, donation],
        [(10, 2100), (11, 2200), (20, 9650)].into_iter().collect(),
        [(1, "Hauptkonto".to_string())].into_iter().collect(),
    );

    let config = ExportConfigBuilder::new(12345, 99999)
        .dictation_mark("KW")
        .build();

    let path = export_year(
        2023,
        &mut source,
        &config,
        &registry,
        &accounts,
        std::path::Path::new("."),
    )
    .expect("export succeeds");

    println!("wrote {}", path.display());
}
