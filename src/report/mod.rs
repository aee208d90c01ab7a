//! Report rendering for accumulated order summaries.
//!
//! Pure text formatting: nothing here mutates the summary or performs I/O.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::order::OrderSummary;

/// Renders one report block for a finished order file scan.
///
/// All monetary values are shown with two fixed decimal places. When no line
/// ever updated the running maximum, an explicit absence message is emitted
/// instead of the top purchase.
pub fn render(file: &str, summary: &OrderSummary) -> String {
    let mut out = String::new();

    // Infallible on String; discarded results keep the call sites tidy.
    let _ = writeln!(out, "--- Report for {} ---", file);
    let _ = writeln!(out, "Total cost: ${}", money(summary.total_cost));
    let _ = writeln!(out, "Total items bought: {}", summary.total_amount);
    let _ = writeln!(out, "Average discount: ${}", money(summary.average_discount()));

    match &summary.top_product {
        Some(product) => {
            let _ = writeln!(
                out,
                "Most expensive purchase after discount: {} (${})",
                product.name,
                money(summary.top_cost)
            );
        }
        None => {
            let _ = writeln!(out, "No expensive purchase recorded.");
        }
    }

    out
}

/// Formats a monetary value with exactly two decimal places, using banker's
/// rounding.
fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::order::scan_lines;

    #[test]
    fn test_render_full_report() {
        let (catalog, _) = Catalog::parse("1,Pen,1.50\n2,Mug,5.00", 100);
        let outcome = scan_lines("orders.txt", ["1,2,0.50", "2,1,0.00", "9,1,0.00"], &catalog);

        let text = render("2021_order_details.txt", &outcome.summary);

        assert_eq!(
            text,
            "--- Report for 2021_order_details.txt ---\n\
             Total cost: $7.50\n\
             Total items bought: 3\n\
             Average discount: $0.17\n\
             Most expensive purchase after discount: Mug ($5.00)\n"
        );
    }

    #[test]
    fn test_render_empty_summary() {
        let summary = OrderSummary::default();

        let text = render("empty.txt", &summary);

        assert!(text.contains("Total cost: $0.00"));
        assert!(text.contains("Total items bought: 0"));
        assert!(text.contains("Average discount: $0.00"));
        assert!(text.contains("No expensive purchase recorded."));
    }

    #[test]
    fn test_money_two_decimal_places() {
        assert_eq!(money("7.5".parse().expect("decimal")), "7.50");
        assert_eq!(money("0".parse().expect("decimal")), "0.00");
        assert_eq!(money("3.14159".parse().expect("decimal")), "3.14");
    }

    #[test]
    fn test_money_bankers_rounding() {
        assert_eq!(money("2.345".parse().expect("decimal")), "2.34");
        assert_eq!(money("2.355".parse().expect("decimal")), "2.36");
    }
}
