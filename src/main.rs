use chrono::{Local, NaiveDate};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use barber_booking::config::AppConfig;
use barber_booking::form::BookingForm;
use barber_booking::models::CustomerField;
use barber_booking::services::api::http::HttpBookingApi;
use barber_booking::services::api::BookingApi;

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    tracing::info!(api = %config.api_base_url, "using booking API");

    let api =
        HttpBookingApi::with_timeout(config.api_base_url.clone(), config.request_timeout_secs)?;
    let mut form = BookingForm::new(config.form.clone());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Book Your Appointment");
    println!("Choose your preferred date, time, and service\n");

    loop {
        if !fill_form(&mut form, &api, &mut input).await? {
            return Ok(());
        }

        match form.submit(&api).await {
            Ok(confirmation) => {
                println!("\n{}\n", confirmation.summary());
                match prompt(&mut input, "Book another appointment? [y/N]").await? {
                    Some(answer) if answer.eq_ignore_ascii_case("y") => form.reset(),
                    _ => return Ok(()),
                }
            }
            Err(e) => {
                println!("\n{e}");
                match prompt(&mut input, "Edit your booking and try again? [Y/n]").await? {
                    Some(answer) if answer.eq_ignore_ascii_case("n") => return Ok(()),
                    None => return Ok(()),
                    _ => {}
                }
            }
        }
    }
}

/// Walks through every field. Returns false when input runs out.
async fn fill_form(
    form: &mut BookingForm,
    api: &dyn BookingApi,
    input: &mut Input,
) -> anyhow::Result<bool> {
    let today = Local::now().date_naive();
    let (min, max) = form.date_bounds(today);

    loop {
        let label = format!(
            "Select date ({min} to {max}){}",
            current(form.state().date.map(|d| d.to_string()))
        );
        let Some(answer) = prompt(input, &label).await? else {
            return Ok(false);
        };
        if answer.is_empty() && form.state().date.is_some() {
            break;
        }
        match NaiveDate::parse_from_str(&answer, "%Y-%m-%d") {
            Ok(date) => match form.set_date(date, today) {
                Ok(()) => break,
                Err(e) => println!("{e}"),
            },
            Err(_) => println!("Please enter a date as YYYY-MM-DD"),
        }
    }

    println!("\nChoose your stylist:");
    for stylist in &form.config().catalog.stylists {
        println!("  {:<6} {}", stylist.id, stylist.name);
    }
    loop {
        let label = format!(
            "Stylist id (any for no preference){}",
            current(Some(form.state().stylist.clone()))
        );
        let Some(answer) = prompt(input, &label).await? else {
            return Ok(false);
        };
        if answer.is_empty() && !form.state().stylist.is_empty() {
            break;
        }
        match form.set_stylist(&answer) {
            Ok(()) => break,
            Err(e) => println!("{e}"),
        }
    }

    if let Err(e) = form.refresh_slots(api).await {
        println!("Could not load availability: {e}");
        return Ok(false);
    }
    println!("\nAvailable time slots (* booked):");
    for row in form.slots().chunks(6) {
        let line: Vec<String> = row
            .iter()
            .map(|s| format!("{}{}", s.time, if s.available { " " } else { "*" }))
            .collect();
        println!("  {}", line.join(" "));
    }
    loop {
        let label = format!("Time (HH:MM){}", current(Some(form.state().time.clone())));
        let Some(answer) = prompt(input, &label).await? else {
            return Ok(false);
        };
        if answer.is_empty() && !form.state().time.is_empty() {
            break;
        }
        match form.select_time(&answer) {
            Ok(()) => break,
            Err(e) => println!("{e}"),
        }
    }

    println!("\nSelect service:");
    for service in &form.config().catalog.services {
        println!(
            "  {:<15} {:<25} {:>4}  {}",
            service.id, service.name, service.price, service.duration
        );
    }
    loop {
        let label = format!("Service id{}", current(Some(form.state().service.clone())));
        let Some(answer) = prompt(input, &label).await? else {
            return Ok(false);
        };
        if answer.is_empty() && !form.state().service.is_empty() {
            break;
        }
        match form.select_service(&answer) {
            Ok(()) => break,
            Err(e) => println!("{e}"),
        }
    }

    println!("\nYour details (* required):");
    let fields = [
        (CustomerField::Name, "Full Name *"),
        (CustomerField::Phone, "Phone Number *"),
        (CustomerField::Email, "Email Address"),
        (CustomerField::Whatsapp, "WhatsApp Number"),
    ];
    for (field, label) in fields {
        let existing = match field {
            CustomerField::Name => &form.state().customer.name,
            CustomerField::Phone => &form.state().customer.phone,
            CustomerField::Email => &form.state().customer.email,
            CustomerField::Whatsapp => &form.state().customer.whatsapp,
        };
        let label = format!("{label}{}", current(Some(existing.clone())));
        let Some(answer) = prompt(input, &label).await? else {
            return Ok(false);
        };
        if !answer.is_empty() {
            form.update_customer(field, answer)?;
        }
    }

    Ok(true)
}

fn current(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!(" [{v}]"),
        _ => String::new(),
    }
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{label}: ").as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}
