//! Excel (.xlsx) rendering of the daily report.
//!
//! Two sheets: a Summary sheet with the day's totals and a Best Sellers
//! sheet with one row per menu item, already ranked by the report
//! engine.

use rust_xlsxwriter::{Format, Workbook};

use warung_core::report::DailyReport;

use super::RenderError;

/// Renders the daily report as an xlsx workbook.
pub fn render_excel(report: &DailyReport) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let summary = workbook.add_worksheet().set_name("Summary")?;
    summary.write_string_with_format(0, 0, "Date", &bold)?;
    summary.write_string(0, 1, report.date.to_string())?;
    summary.write_string_with_format(1, 0, "Total Revenue", &bold)?;
    summary.write_number(1, 1, report.total_revenue.rupiah() as f64)?;
    summary.write_string_with_format(2, 0, "Total Transactions", &bold)?;
    summary.write_number(2, 1, report.total_transactions as f64)?;
    summary.write_string_with_format(3, 0, "Total Items", &bold)?;
    summary.write_number(3, 1, report.total_items as f64)?;

    let sellers = workbook.add_worksheet().set_name("Best Sellers")?;
    sellers.write_string_with_format(0, 0, "ID", &bold)?;
    sellers.write_string_with_format(0, 1, "Name", &bold)?;
    sellers.write_string_with_format(0, 2, "Count", &bold)?;
    sellers.write_string_with_format(0, 3, "Revenue", &bold)?;

    for (i, seller) in report.best_sellers.iter().enumerate() {
        let row = (i + 1) as u32;
        sellers.write_number(row, 0, seller.menu_id as f64)?;
        sellers.write_string(row, 1, &seller.name)?;
        sellers.write_number(row, 2, seller.count as f64)?;
        sellers.write_number(row, 3, seller.revenue.rupiah() as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warung_core::report::BestSeller;
    use warung_core::Money;

    fn sample_report() -> DailyReport {
        DailyReport {
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            total_revenue: Money::from_rupiah(69_000),
            total_transactions: 2,
            total_items: 6,
            best_sellers: vec![
                BestSeller {
                    menu_id: 1,
                    name: "Nasi Goreng".to_string(),
                    count: 3,
                    revenue: Money::from_rupiah(54_000),
                },
                BestSeller {
                    menu_id: 2,
                    name: "Es Teh".to_string(),
                    count: 3,
                    revenue: Money::from_rupiah(15_000),
                },
            ],
        }
    }

    #[test]
    fn test_renders_xlsx_bytes() {
        let bytes = render_excel(&sample_report()).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn test_renders_empty_report() {
        let report = DailyReport {
            best_sellers: vec![],
            total_revenue: Money::zero(),
            total_transactions: 0,
            total_items: 0,
            ..sample_report()
        };
        let bytes = render_excel(&report).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
