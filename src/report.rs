// src/report.rs
//! Static HTML report over the whole catalog, cheapest per unit of mass first.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::PriceCatalog;
use crate::ingest::types::Record;

pub const DEFAULT_OUTPUT: &str = "output.html";
pub const DEFAULT_TITLE: &str = "Позиции продуктов";

const COLUMNS: [&str; 6] = ["№", "Название", "Цена", "Фасовка", "Файл", "Цена за кг."];

/// Number formatting used for the raw price and weight cells: shortest
/// round-trip digits, integral values keep one decimal (`50.0`, `0.5`,
/// `12.25`). Decimal exponents below -4 or from 16 up switch to exponent
/// form with a signed, two-digit exponent (`5e-05`, `1e+16`).
pub fn format_raw(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    // `{:e}` yields the shortest round-trip mantissa, e.g. `1.25e-7`
    let sci = format!("{v:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..16).contains(&exp) {
        if v.fract() == 0.0 {
            format!("{v:.1}")
        } else {
            v.to_string()
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

/// Render `records` (already in display order) as a complete HTML document.
/// Every text cell and the title are HTML-escaped.
pub fn render_html<'a, I>(records: I, title: &str) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = String::with_capacity(4096);
    let title = html_escape::encode_text(title);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("    <meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "    <title>{title}</title>");
    out.push_str("</head>\n<body>\n    <table border=\"1\">\n        <tr>\n");
    for col in COLUMNS {
        let _ = writeln!(out, "            <th>{col}</th>");
    }
    out.push_str("        </tr>\n");

    for (idx, r) in records.into_iter().enumerate() {
        out.push_str("        <tr>\n");
        let _ = writeln!(out, "            <td>{}</td>", idx + 1);
        let _ = writeln!(out, "            <td>{}</td>", html_escape::encode_text(r.product()));
        let _ = writeln!(out, "            <td>{}</td>", format_raw(r.price()));
        let _ = writeln!(out, "            <td>{}</td>", format_raw(r.weight()));
        let _ = writeln!(out, "            <td>{}</td>", html_escape::encode_text(r.source_file()));
        let _ = writeln!(out, "            <td>{:.2}</td>", r.price_per_unit_mass());
        out.push_str("        </tr>\n");
    }

    out.push_str("    </table>\n</body>\n</html>\n");
    out
}

/// Write the report for `catalog` to `dest`, overwriting any existing file.
pub fn export_html(catalog: &PriceCatalog, dest: &Path, title: &str) -> Result<()> {
    let html = render_html(catalog.sorted_by_unit_price(), title);
    fs::write(dest, html).with_context(|| format!("writing report to {}", dest.display()))?;
    tracing::info!(target: "report", path = %dest.display(), rows = catalog.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_format_keeps_a_decimal() {
        assert_eq!(format_raw(50.0), "50.0");
        assert_eq!(format_raw(0.5), "0.5");
        assert_eq!(format_raw(12.25), "12.25");
        assert_eq!(format_raw(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_raw(-0.0), "-0.0");
    }

    #[test]
    fn raw_format_uses_exponent_at_extremes() {
        assert_eq!(format_raw(1e16), "1e+16");
        assert_eq!(format_raw(1.5e20), "1.5e+20");
        assert_eq!(format_raw(0.00005), "5e-05");
        assert_eq!(format_raw(-1.25e-7), "-1.25e-07");
        assert_eq!(format_raw(1e-100), "1e-100");
        // boundaries stay positional
        assert_eq!(format_raw(0.0001), "0.0001");
        assert_eq!(format_raw(9999999999999998.0), "9999999999999998.0");
    }

    #[test]
    fn renders_header_and_rows_in_given_order() {
        let a = Record::new("Молоко", 80.0, 1.0, "price2.csv").unwrap();
        let b = Record::new("Хлеб", 50.0, 0.5, "price1.csv").unwrap();
        let html = render_html([&a, &b], DEFAULT_TITLE);

        assert!(html.contains("<title>Позиции продуктов</title>"));
        assert!(html.contains("<th>Цена за кг.</th>"));
        assert!(html.contains("<td>80.00</td>"));
        assert!(html.contains("<td>100.00</td>"));
        assert!(html.contains("<td>0.5</td>"));
        assert!(html.find("Молоко").unwrap() < html.find("Хлеб").unwrap());
    }

    #[test]
    fn escapes_markup_in_text_cells() {
        let r = Record::new("<b>Сыр</b> & co", 1.0, 1.0, "price<1>.csv").unwrap();
        let html = render_html([&r], "a < b");
        assert!(html.contains("&lt;b&gt;Сыр&lt;/b&gt; &amp; co"));
        assert!(html.contains("price&lt;1&gt;.csv"));
        assert!(html.contains("<title>a &lt; b</title>"));
        assert!(!html.contains("<b>"));
    }
}
