// tests/report_html.rs
use price_list_analyzer::report::{export_html, DEFAULT_TITLE};
use price_list_analyzer::{PriceCatalog, Record};
use std::fs;

fn rec(product: &str, price: f64, weight: f64, file: &str) -> Record {
    Record::new(product, price, weight, file).unwrap()
}

#[test]
fn report_is_sorted_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("output.html");
    fs::write(&dest, "stale content").unwrap();

    let catalog = PriceCatalog::from_records(vec![
        rec("Дорогое", 300.0, 1.0, "price1.csv"),
        rec("Дешёвое", 10.0, 1.0, "price1.csv"),
        rec("Среднее", 100.0, 1.0, "price2.csv"),
    ]);
    export_html(&catalog, &dest, DEFAULT_TITLE).unwrap();

    let html = fs::read_to_string(&dest).unwrap();
    assert!(!html.contains("stale content"));
    let a = html.find("Дешёвое").unwrap();
    let b = html.find("Среднее").unwrap();
    let c = html.find("Дорогое").unwrap();
    assert!(a < b && b < c);
    assert_eq!(html.matches("<tr>").count(), 4);
}

#[test]
fn ties_keep_catalog_order() {
    let catalog = PriceCatalog::from_records(vec![
        rec("first", 20.0, 2.0, "p"),
        rec("second", 10.0, 1.0, "p"),
        rec("third", 5.0, 0.5, "p"),
    ]);
    let html = price_list_analyzer::report::render_html(catalog.sorted_by_unit_price(), "t");
    let f = html.find("first").unwrap();
    let s = html.find("second").unwrap();
    let t = html.find("third").unwrap();
    assert!(f < s && s < t);
}

#[test]
fn empty_catalog_renders_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.html");
    export_html(&PriceCatalog::new(), &dest, DEFAULT_TITLE).unwrap();
    let html = fs::read_to_string(&dest).unwrap();
    assert_eq!(html.matches("<tr>").count(), 1);
    assert!(html.contains("<th>№</th>"));
}

#[test]
fn unwritable_destination_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing").join("out.html");
    let err = export_html(&PriceCatalog::new(), &dest, DEFAULT_TITLE).unwrap_err();
    assert!(format!("{err:#}").contains("writing report"));
}
