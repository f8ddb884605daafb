//! Catalog CLI commands: services, packages, add-ons, and instant quotes.

//!
//! Backend failures here are logged and rendered as an empty result; only
//! local input errors fail the command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tracing::warn;

use carcare_core::api::BookingApi;
use carcare_core::draft::DraftField;
use carcare_core::page::booking::BookingPage;
use carcare_types::addon::ADDONS;
use carcare_types::service::PricingTable;

use super::{QuoteArgs, print_field, print_info, spinner};

/// List the service catalog in a table.
pub async fn list_services<A: BookingApi>(api: &A, json: bool) -> Result<()> {
    let services = api.list_services().await.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load service catalog");
        Vec::new()
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    if services.is_empty() {
        print_info("No services are offered right now.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Service").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("Duration").fg(Color::White),
    ]);

    for service in &services {
        table.add_row(vec![
            Cell::new(&service.name).fg(Color::Cyan),
            Cell::new(&service.description),
            Cell::new(service.display_price()).fg(Color::Green),
            Cell::new(service.display_duration()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  Book one with: {}",
        style("carcare book --service <name>").yellow()
    );
    println!();

    Ok(())
}

/// List the packages the pricing table offers for `service`.
pub async fn list_packages<A: BookingApi>(api: &A, service: &str, json: bool) -> Result<()> {
    let pricing = api.get_pricing().await.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load pricing table");
        PricingTable::default()
    });
    let packages = pricing.packages_for(service);

    if json {
        println!("{}", serde_json::to_string_pretty(packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        print_info(format!(
            "No packages for '{}'. The base service can still be booked.",
            style(service).cyan()
        ));
        return Ok(());
    }

    println!();
    println!("  Packages for {}:", style(service).cyan().bold());
    for package in packages {
        println!("    {} {}", style("•").dim(), package.name);
    }
    println!();

    Ok(())
}

/// List the fixed add-on catalog.
pub fn list_addons(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ADDONS)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Code").fg(Color::White),
        Cell::new("Add-on").fg(Color::White),
        Cell::new("Price").fg(Color::White),
    ]);
    for addon in &ADDONS {
        table.add_row(vec![
            Cell::new(addon.code).fg(Color::DarkGrey),
            Cell::new(addon.label).fg(Color::Cyan),
            Cell::new(format!("+${}", addon.price)).fg(Color::Green),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// Request an instant quote for a selection.
///
/// A failed quote leaves the total blank (`null` under `--json`); the page
/// has already logged why.
pub async fn quote<A: BookingApi>(api: A, args: QuoteArgs, json: bool) -> Result<()> {
    let mut page = BookingPage::new(api);
    apply_selection(&mut page, &args)?;

    let spinner = spinner("Calculating quote...")?;
    let quote = page.request_quote().await.ok().cloned();
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let total = quote
        .as_ref()
        .map(|q| q.display_total())
        .unwrap_or_else(|| "-".to_string());

    println!();
    print_field("Service", style(&args.service).cyan());
    if let Some(package) = &args.package {
        print_field("Package", package);
    }
    if !args.addons.is_empty() {
        print_field("Add-ons", args.addons.join(", "));
    }
    print_field("Estimated total", style(total).green().bold());
    println!();

    Ok(())
}

/// Copy the quoted selection from flags into the page's draft.
fn apply_selection<A: BookingApi>(page: &mut BookingPage<A>, args: &QuoteArgs) -> Result<()> {
    page.select_service(&args.service);
    if let Some(package) = &args.package {
        page.set_field(DraftField::PackageName, package);
    }
    for code in &args.addons {
        page.toggle_addon(code, true)?;
    }
    if let Some(lat) = &args.lat {
        page.set_field(DraftField::Latitude, lat);
    }
    if let Some(lng) = &args.lng {
        page.set_field(DraftField::Longitude, lng);
    }
    Ok(())
}
