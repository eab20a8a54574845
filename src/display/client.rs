//! Client display formatting
//!
//! Formats clients for terminal output in table and detail views.

use crate::models::Client;

/// Format a list of clients as a table
pub fn format_client_list(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "No clients found.".to_string();
    }

    let name_width = column_width(clients.iter().map(|c| c.name.as_str()), "Name");
    let phone_width = column_width(clients.iter().map(|c| c.phone.as_str()), "Phone");

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<name_width$}  {:<phone_width$}  {:>12}  {:>8}  {:>12}\n",
        "ID",
        "Name",
        "Phone",
        "Consumption",
        "Rate",
        "Last Bill",
        name_width = name_width,
        phone_width = phone_width,
    ));

    output.push_str(&format!(
        "{:->6}  {:-<name_width$}  {:-<phone_width$}  {:->12}  {:->8}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        phone_width = phone_width,
    ));

    for client in clients {
        output.push_str(&format!(
            "{:>6}  {:<name_width$}  {:<phone_width$}  {:>12.2}  {:>8.4}  {:>12.2}\n",
            client.id,
            client.name,
            client.phone,
            client.consumption,
            client.rate,
            client.last_bill,
            name_width = name_width,
            phone_width = phone_width,
        ));
    }

    output
}

/// Format a single client's details
pub fn format_client_details(client: &Client) -> String {
    let mut output = String::new();

    output.push_str(&format!("Client: {}\n", client.name));
    output.push_str(&format!("  ID:          {}\n", client.id));
    output.push_str(&format!("  Address:     {}\n", client.address));
    output.push_str(&format!("  Phone:       {}\n", client.phone));
    output.push_str(&format!("  Consumption: {:.2} kWh\n", client.consumption));
    output.push_str(&format!("  Rate:        {:.4}\n", client.rate));
    output.push_str(&format!("  Last Bill:   {:.2}\n", client.last_bill));

    output
}

pub(crate) fn column_width<'a, I>(values: I, header: &str) -> usize
where
    I: Iterator<Item = &'a str>,
{
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}
