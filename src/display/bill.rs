//! Bill display formatting

use crate::models::Bill;

use super::client::column_width;

fn paid_label(bill: &Bill) -> &'static str {
    if bill.paid {
        "Paid"
    } else {
        "Unpaid"
    }
}

/// Format a list of bills as a table, with a total row
pub fn format_bill_list(bills: &[Bill]) -> String {
    if bills.is_empty() {
        return "No bills found.".to_string();
    }

    let due_width = column_width(bills.iter().map(|b| b.due_date.as_str()), "Due");

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:>6}  {:>12}  {:>8}  {:>12}  {:<due_width$}  {}\n",
        "ID",
        "Client",
        "Consumption",
        "Rate",
        "Amount",
        "Due",
        "Status",
        due_width = due_width,
    ));

    let separator = format!(
        "{:->6}  {:->6}  {:->12}  {:->8}  {:->12}  {:-<due_width$}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        due_width = due_width,
    );
    output.push_str(&separator);

    for bill in bills {
        output.push_str(&format!(
            "{:>6}  {:>6}  {:>12.2}  {:>8.4}  {:>12.2}  {:<due_width$}  {}\n",
            bill.id,
            bill.client_id,
            bill.consumption,
            bill.rate,
            bill.amount,
            bill.due_date,
            paid_label(bill),
            due_width = due_width,
        ));
    }

    let total: f64 = bills.iter().map(|b| b.amount).sum();
    output.push_str(&separator);
    output.push_str(&format!(
        "{:<6}  {:>6}  {:>12}  {:>8}  {:>12.2}\n",
        "TOTAL", "", "", "", total
    ));

    output
}

/// Format a single bill's details
pub fn format_bill_details(bill: &Bill) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill #{}\n", bill.id));
    output.push_str(&format!("  Client:      {}\n", bill.client_id));
    output.push_str(&format!("  Consumption: {:.2} kWh\n", bill.consumption));
    output.push_str(&format!("  Rate:        {:.4}\n", bill.rate));
    output.push_str(&format!("  Amount:      {:.2}\n", bill.amount));
    output.push_str(&format!("  Due:         {}\n", bill.due_date));
    output.push_str(&format!("  Status:      {}\n", paid_label(bill)));

    output
}
