use crate::model::AggregateStats;
use crate::view::SummaryCard;

/// Which screen the KPI row is rendered on; only the headline title differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardScope {
    Overall,
    Daily,
}

/// Formats a value with no fraction digits and Indian digit grouping
/// (`1234567.8` → `12,34,568`).
pub fn format_grouped(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (front, pair) = rest.split_at(rest.len() - 2);
            groups.push(pair);
            rest = front;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn rupees(value: f64) -> String {
    format!("₹{}", format_grouped(value))
}

fn liters(value: f64) -> String {
    format!("{} L", format_grouped(value))
}

fn card(title: &str, value: String, subtitle: String) -> SummaryCard {
    SummaryCard {
        title: title.to_string(),
        value,
        subtitle,
    }
}

pub fn summary_cards(stats: &AggregateStats, scope: CardScope) -> Vec<SummaryCard> {
    let headline = match scope {
        CardScope::Overall => "Total Sales",
        CardScope::Daily => "Daily Sales",
    };
    let average = stats
        .average_value()
        .map(rupees)
        .unwrap_or_else(|| "n/a".to_string());

    vec![
        card(
            headline,
            rupees(stats.total_sales),
            format!("{} transactions", stats.total_transactions),
        ),
        card("Total Liters", liters(stats.total_liters), "Fuel dispensed".to_string()),
        card("Petrol Sales", rupees(stats.petrol_sales), liters(stats.petrol_liters)),
        card("Diesel Sales", rupees(stats.diesel_sales), liters(stats.diesel_liters)),
        card("Avg Transaction", average, "Per transaction".to_string()),
    ]
}
