//! The `book` command: one-shot flags or an interactive wizard.
//!
//! Every value goes through [`BookingPage`], so the wizard and the one-shot
//! path build exactly the same request.

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveTime};
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use carcare_core::api::BookingApi;
use carcare_core::draft::DraftField;
use carcare_core::page::booking::{BookingPage, SubmitOutcome};
use carcare_types::addon::{ADDONS, addons_total};
use carcare_types::booking::BookingDraft;
use carcare_types::service::find_service;

use super::{BookArgs, print_field, spinner};
use crate::state::AppState;

/// Create a booking via interactive wizard or one-shot flags.
///
/// # Examples
///
/// ```bash
/// # Interactive wizard
/// carcare book
///
/// # One-shot with flags
/// carcare book --name "Asha Rao" --phone 555-0101 --address "12 MG Road" \
///     --make Maruti --model Swift --service Wash \
///     --date 2026-10-20 --time 10:30 --addon pickup_drop --quote
/// ```
pub async fn book(state: &AppState, args: BookArgs, json: bool) -> Result<()> {
    let interactive = !has_required_flags(&args);

    if let Some(date) = &args.date {
        check_date(date).map_err(anyhow::Error::msg)?;
    }
    if let Some(time) = &args.time {
        check_time(time).map_err(anyhow::Error::msg)?;
    }

    let mut page = BookingPage::new(state.api.clone());
    let loading = spinner("Loading services...")?;
    page.load().await;
    loading.finish_and_clear();

    let fields = [
        (DraftField::CustomerName, args.name, "Your name"),
        (DraftField::Phone, args.phone, "Phone"),
        (DraftField::Address, args.address, "Service address"),
        (DraftField::VehicleMake, args.make, "Vehicle make"),
        (DraftField::VehicleModel, args.model, "Vehicle model"),
    ];
    for (field, value, prompt) in fields {
        let value = text_or_prompt(value, prompt)?;
        page.set_field(field, &value);
    }

    let service = match args.service {
        Some(service) => {
            if !page.services().is_empty() && find_service(page.services(), &service).is_none() {
                tracing::warn!(service = %service, "service is not in the catalog");
                if !json {
                    println!(
                        "  {} '{}' is not in the service catalog; booking it anyway.",
                        style("!").yellow().bold(),
                        service
                    );
                }
            }
            service
        }
        None => choose_service(&page, &state.config.backend_url)?,
    };
    page.select_service(&service);

    match args.package {
        Some(package) => {
            page.set_field(DraftField::PackageName, &package);
        }
        None if interactive => {
            if let Some(package) = choose_package(&page)? {
                page.set_field(DraftField::PackageName, &package);
            }
        }
        None => {}
    }

    for code in &args.addons {
        page.toggle_addon(code, true)?;
    }
    if interactive && args.addons.is_empty() {
        for code in choose_addons()? {
            page.toggle_addon(code, true)?;
        }
    }

    let date = match args.date {
        Some(date) => date,
        None => prompt_validated("Preferred date (YYYY-MM-DD)", check_date)?,
    };
    page.set_field(DraftField::PreferredDate, &date);

    let time = match args.time {
        Some(time) => time,
        None => prompt_validated("Preferred time (HH:MM)", check_time)?,
    };
    page.set_field(DraftField::PreferredTime, &time);

    let optional = [
        (DraftField::Latitude, args.lat, "Latitude (optional)"),
        (DraftField::Longitude, args.lng, "Longitude (optional)"),
        (DraftField::Notes, args.notes, "Notes (optional)"),
    ];
    for (field, value, prompt) in optional {
        let value = match value {
            Some(value) => value,
            None if interactive => prompt_optional(prompt)?,
            None => continue,
        };
        page.set_field(field, &value);
    }

    let want_quote = args.quote
        || (interactive
            && Confirm::new()
                .with_prompt("Get instant quote?")
                .default(true)
                .interact()?);
    if want_quote {
        let quoting = spinner("Calculating quote...")?;
        let result = page.request_quote().await;
        quoting.finish_and_clear();
        if let (Ok(quote), false) = (result, json) {
            println!();
            print_field("Estimated total", style(quote.display_total()).green().bold());
        }
    }

    if interactive {
        print_summary(page.draft());
        let submit = Confirm::new()
            .with_prompt("Submit booking?")
            .default(true)
            .interact()?;
        if !submit {
            println!("  Booking not submitted.");
            return Ok(());
        }
    }

    let submitting = spinner("Submitting booking...")?;
    let outcome = page.submit().await;
    submitting.finish_and_clear();

    let message = page.message().unwrap_or_default().to_string();
    match outcome {
        SubmitOutcome::Submitted { booking_id } => {
            if json {
                let body = serde_json::json!({
                    "submitted": true,
                    "booking_id": booking_id,
                    "message": message,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            println!();
            println!("  {} {}", style("✓").green().bold(), message);
            if let Some(id) = booking_id {
                print_field("ID", style(id).dim());
            }
            println!();
            Ok(())
        }
        SubmitOutcome::Failed => {
            if json {
                let body = serde_json::json!({ "submitted": false, "message": message });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            bail!(message)
        }
        SubmitOutcome::Incomplete { missing } => {
            bail!("missing required fields: {}", missing.join(", "))
        }
    }
}

/// Whether the flags alone are enough to submit without prompting.
fn has_required_flags(args: &BookArgs) -> bool {
    [
        &args.name,
        &args.phone,
        &args.address,
        &args.make,
        &args.model,
        &args.service,
        &args.date,
        &args.time,
    ]
    .iter()
    .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
}

fn check_date(value: &str) -> Result<(), String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| format!("'{value}' is not a date (expected YYYY-MM-DD)"))
}

fn check_time(value: &str) -> Result<(), String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| format!("'{value}' is not a time (expected HH:MM)"))
}

/// The flag value when given and non-blank, otherwise a required prompt.
fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }
    prompt_validated(prompt, |s| {
        if s.trim().is_empty() {
            Err("This field is required".to_string())
        } else {
            Ok(())
        }
    })
}

fn prompt_validated(prompt: &str, check: fn(&str) -> Result<(), String>) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|s: &String| check(s))
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn prompt_optional(prompt: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn choose_service<A: BookingApi>(page: &BookingPage<A>, backend_url: &str) -> Result<String> {
    let services = page.services();
    if services.is_empty() {
        bail!(
            "could not load the service catalog from {backend_url}; pass --service to book anyway"
        );
    }

    let items: Vec<String> = services
        .iter()
        .map(|s| format!("{}  {}  {}", s.name, s.display_price(), s.display_duration()))
        .collect();
    let index = Select::new()
        .with_prompt("Service")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(services[index].name.clone())
}

/// Offer the selected service's packages; `None` when there are none or
/// the customer picks the base service.
fn choose_package<A: BookingApi>(page: &BookingPage<A>) -> Result<Option<String>> {
    let packages = page.packages();
    if packages.is_empty() {
        return Ok(None);
    }

    let mut items = vec!["No package".to_string()];
    items.extend(packages.iter().map(|p| p.name.clone()));
    let index = Select::new()
        .with_prompt("Package")
        .items(&items)
        .default(0)
        .interact()?;

    Ok((index > 0).then(|| packages[index - 1].name.clone()))
}

fn choose_addons() -> Result<Vec<&'static str>> {
    let items: Vec<String> = ADDONS.iter().map(|a| a.display()).collect();
    let chosen = MultiSelect::new()
        .with_prompt("Add-ons (space to toggle, enter to confirm)")
        .items(&items)
        .interact()?;
    Ok(chosen.into_iter().map(|i| ADDONS[i].code).collect())
}

fn print_summary(draft: &BookingDraft) {
    println!();
    println!("  {}", style("Booking summary").bold().underlined());
    print_field("Customer", format!("{} ({})", draft.customer_name, draft.phone));
    print_field("Address", &draft.address);
    print_field(
        "Vehicle",
        format!("{} {}", draft.vehicle_make, draft.vehicle_model),
    );
    print_field("Service", style(&draft.service_name).cyan());
    if let Some(package) = &draft.package_name {
        print_field("Package", package);
    }
    if !draft.selected_addons.is_empty() {
        print_field(
            "Add-ons",
            format!(
                "{} (+${})",
                draft.selected_addons.join(", "),
                addons_total(&draft.selected_addons)
            ),
        );
    }
    print_field(
        "When",
        format!("{} {}", draft.preferred_date, draft.preferred_time),
    );
    if !draft.notes.trim().is_empty() {
        print_field("Notes", &draft.notes);
    }
    println!();
}
