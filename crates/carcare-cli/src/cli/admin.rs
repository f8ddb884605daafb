//! Admin CLI commands: list bookings and change their status.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tracing::debug;

use carcare_core::api::BookingApi;
use carcare_core::page::admin::AdminPage;
use carcare_types::booking::{BookingRecord, BookingStatus};

use super::{print_info, spinner};

/// List bookings, optionally only those in `status`.
///
/// This is the one admin command that fails when the backend does.
pub async fn list_bookings<A: BookingApi>(
    api: A,
    status: Option<BookingStatus>,
    json: bool,
) -> Result<()> {
    let mut page = AdminPage::new(api).with_filter(status);

    let loading = spinner("Loading bookings...")?;
    let result = page.refresh().await;
    loading.finish_and_clear();
    result?;

    print_bookings(&page, json)
}

/// Move booking `id` to `status` and show the refreshed list.
///
/// Only a transition refused locally fails the command. A backend failure
/// is logged by the page and the list is shown as it was.
pub async fn set_status<A: BookingApi>(
    api: A,
    id: &str,
    status: BookingStatus,
    json: bool,
) -> Result<()> {
    let mut page = AdminPage::new(api);

    let working = spinner("Updating booking...")?;
    // Loaded first so the transition policy sees the current status. A
    // failed load still lets the update go through unchecked.
    if let Err(e) = page.refresh().await {
        debug!(error = %e, "updating without the current status");
    }
    let result = page.transition(id, status).await;
    working.finish_and_clear();

    if result? && !json {
        println!();
        println!(
            "  {} Booking {} is now {}",
            style("✓").green().bold(),
            style(id).cyan(),
            status_label(status)
        );
    }

    print_bookings(&page, json)
}

fn print_bookings<A: BookingApi>(page: &AdminPage<A>, json: bool) -> Result<()> {
    let bookings = page.bookings();

    if json {
        println!("{}", serde_json::to_string_pretty(bookings)?);
        return Ok(());
    }

    if bookings.is_empty() {
        let scope = match page.filter() {
            Some(status) => format!("{status} bookings"),
            None => "bookings".to_string(),
        };
        print_info(format!("No {scope} found."));
        return Ok(());
    }

    println!();
    println!("{}", bookings_table(bookings));
    println!();
    println!(
        "  {} booking{}{}",
        style(bookings.len()).bold(),
        if bookings.len() == 1 { "" } else { "s" },
        page.filter()
            .map(|s| format!(" ({s})"))
            .unwrap_or_default()
    );
    println!();

    Ok(())
}

fn bookings_table(bookings: &[BookingRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Customer").fg(Color::White),
        Cell::new("Vehicle").fg(Color::White),
        Cell::new("Service").fg(Color::White),
        Cell::new("When").fg(Color::White),
        Cell::new("Quote").fg(Color::White),
        Cell::new("Status").fg(Color::White),
    ]);

    for booking in bookings {
        let service = match &booking.package_name {
            Some(package) => format!("{} / {}", booking.service_name, package),
            None => booking.service_name.clone(),
        };
        let service = if booking.selected_addons.is_empty() {
            service
        } else {
            format!("{service}\n+ {}", booking.selected_addons.join(", "))
        };

        let customer = format!("{}\n{}", booking.customer_name, booking.phone);
        let quote = booking
            .quoted_price
            .map(|p| format!("${p:.2}"))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&booking.id).fg(Color::DarkGrey),
            Cell::new(customer).fg(Color::Cyan),
            Cell::new(booking.vehicle()),
            Cell::new(service),
            Cell::new(booking.scheduled_for()),
            Cell::new(quote).fg(Color::Green),
            status_cell(booking.status),
        ]);
    }

    table
}

fn status_cell(status: BookingStatus) -> Cell {
    match status {
        BookingStatus::Pending => Cell::new("○ pending").fg(Color::Yellow),
        BookingStatus::Confirmed => Cell::new("● confirmed").fg(Color::Blue),
        BookingStatus::Completed => Cell::new("✓ completed").fg(Color::Green),
        BookingStatus::Cancelled => Cell::new("✗ cancelled").fg(Color::DarkGrey),
    }
}

fn status_label(status: BookingStatus) -> String {
    let styled = match status {
        BookingStatus::Pending => style(status.as_str()).yellow(),
        BookingStatus::Confirmed => style(status.as_str()).blue(),
        BookingStatus::Completed => style(status.as_str()).green(),
        BookingStatus::Cancelled => style(status.as_str()).dim(),
    };
    styled.bold().to_string()
}
