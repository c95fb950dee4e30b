use chrono::NaiveDate;
use tally_core::{
    Account, AccountType, BookedTransaction, Direction, Transaction, detect_transaction_location,
    extract_base_location, extract_county_from_address, format_town_display, find_town, TOWNS,
};
use tally_finance::{
    TripExpenseType, classify_trip_expense, detect_trips, find_matching_account,
};
use tally_ingest::{extract_merchant_name, extract_vendor_name};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn expense(id: &str, desc: &str, amount: f64, d: u32) -> Transaction {
    Transaction::new(id, desc, amount, day(d), Direction::Expense)
}

#[test]
fn every_town_is_its_own_base() {
    for town in TOWNS {
        assert_eq!(extract_base_location(Some(town.name), None), Some(town.name));
        let upper = town.name.to_uppercase();
        assert_eq!(extract_base_location(Some(&upper), None), Some(town.name));
    }
}

#[test]
fn base_location_fallback() {
    assert_eq!(extract_base_location(None, None), None);
    assert_eq!(
        extract_base_location(None, Some("Unit 4, Ennis Road, Limerick")),
        extract_base_location(Some("Unit 4, Ennis Road, Limerick"), None)
    );
}

#[test]
fn longest_town_name_wins() {
    assert_eq!(
        detect_transaction_location("POS CENTRA CARRICKMACROSS"),
        Some("Carrickmacross")
    );
}

#[test]
fn county_from_address() {
    assert_eq!(extract_county_from_address("Main St, Navan, Co. Meath"), Some("Meath"));
    assert_eq!(extract_county_from_address("14 Mill Road, Ennis"), Some("Clare"));
}

#[test]
fn town_display() {
    let town = find_town("dun laoghaire").unwrap();
    assert_eq!(format_town_display(town), "Dun Laoghaire, Co. Dublin");
}

#[test]
fn vendor_then_merchant() {
    let vendor = extract_vendor_name("VDP-CHADWICKS DUBLIN 12345678 01/06/2024");
    assert_eq!(vendor, "CHADWICKS DUBLIN");

    let matched = extract_merchant_name(&vendor);
    let merchant = matched.matched_merchant.expect("known merchant");
    assert_eq!(merchant.category, "Materials");
    assert_eq!(matched.clean_name, "Chadwicks");
}

#[test]
fn merchant_category_maps_to_an_account() {
    let accounts = vec![
        Account::new("cos", "Materials Purchased", AccountType::CostOfSales),
        Account::new("sales", "Sales Ireland 23%", AccountType::Income),
        Account::new("gen", "Sales", AccountType::Income),
    ];

    let merchant = extract_merchant_name(&extract_vendor_name("POS HEITON BUCKLEY 998877"))
        .matched_merchant
        .unwrap();
    let acct = find_matching_account(merchant.category, Direction::Expense, None, &accounts);
    assert_eq!(acct.unwrap().id, "cos");

    let no_costs = vec![Account::new("bank", "Current Account", AccountType::Bank)];
    assert!(find_matching_account("Materials", Direction::Expense, None, &no_costs).is_none());

    let acct = find_matching_account("Sales", Direction::Income, Some("standard_23"), &accounts);
    assert_eq!(acct.unwrap().name, "Sales Ireland 23%");
}

#[test]
fn trip_from_two_expenses() {
    let txns = vec![
        expense("1", "POS SUPERMACS ATHLONE", -12.50, 4),
        expense("2", "CIRCLE K ATHLONE", -60.00, 4),
    ];
    let trips = detect_trips(&txns, Some("Dublin"));
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].location, "Athlone");
    assert!((trips[0].total_spend - 72.50).abs() < 1e-9);
}

#[test]
fn single_expense_trips() {
    let plain = vec![expense("1", "CENTRA KILKENNY", -5.0, 4)];
    assert!(detect_trips(&plain, Some("Dublin")).is_empty());

    let hotel = vec![expense("1", "HOTEL KILKENNY", -120.0, 4)];
    assert_eq!(detect_trips(&hotel, Some("Dublin")).len(), 1);
}

#[test]
fn consecutive_days_merge_and_gaps_split() {
    let merged = vec![
        expense("1", "HOTEL WESTPORT", -100.0, 4),
        expense("2", "HOTEL WESTPORT", -100.0, 5),
    ];
    let trips = detect_trips(&merged, Some("Dublin"));
    assert_eq!(trips.len(), 1);
    assert_eq!((trips[0].start_date, trips[0].end_date), (day(4), day(5)));

    let split = vec![
        expense("1", "HOTEL WESTPORT", -100.0, 4),
        expense("2", "HOTEL WESTPORT", -100.0, 6),
    ];
    assert_eq!(detect_trips(&split, Some("Dublin")).len(), 2);
}

#[test]
fn same_county_is_not_a_trip() {
    // Swords and Dun Laoghaire are both in Co. Dublin
    let txns = vec![
        expense("1", "CENTRA DUN LAOGHAIRE", -5.0, 4),
        expense("2", "HOTEL DUN LAOGHAIRE", -100.0, 4),
    ];
    assert!(detect_trips(&txns, Some("Swords")).is_empty());
}

#[test]
fn bank_charges_are_never_trip_spend() {
    assert_eq!(classify_trip_expense("BANK CHARGE Q1"), TripExpenseType::Other);
}

#[test]
fn booked_transactions_round_trip_json() {
    let booked = BookedTransaction::new(expense("1", "X", -1.0, 4), Some("Fuel".into()));
    let json = serde_json::to_value(&booked).unwrap();
    assert_eq!(json["direction"], "expense");
    assert_eq!(json["category"], "Fuel");
}
