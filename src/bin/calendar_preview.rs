use chrono::NaiveDate;
use colored::*;
use pet_booking::{
    config::Config,
    domain::models::{calendar::YearMonth, session::UserSession},
    domain::ports::AvailabilityView,
    domain::services::{
        calendar_grid::CalendarGrid,
        time_slots::{PickerView, TimeSlotPicker},
    },
    infra::factory::bootstrap_state,
    init_logging,
};
use std::env;
use std::process::ExitCode;

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

fn parse_month(raw: &str) -> Option<YearMonth> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok()?;
    Some(YearMonth::containing(first))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(provider_id) = args.first() else {
        eprintln!("{}", "usage: calendar_preview <provider-id> [YYYY-MM]".red().bold());
        return ExitCode::FAILURE;
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_string().red().bold());
            return ExitCode::FAILURE;
        }
    };
    let _guard = init_logging(&config);

    let mut session = UserSession::anonymous(config.default_timezone);
    if let Ok(token) = env::var("API_TOKEN") {
        session = session.with_token(token);
    }
    let today = session.today();

    let month = match args.get(1) {
        Some(raw) => match parse_month(raw) {
            Some(month) => month,
            None => {
                eprintln!("{}", format!("Invalid month '{}', expected YYYY-MM", raw).red().bold());
                return ExitCode::FAILURE;
            }
        },
        None => YearMonth::containing(today),
    };

    let state = match bootstrap_state(&config, session) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.to_string().red().bold());
            return ExitCode::FAILURE;
        }
    };

    let availability = match state.availability_api.fetch(provider_id, AvailabilityView::Bookable).await {
        Ok(map) => map,
        Err(e) => {
            eprintln!("{}", e.user_message().red().bold());
            return ExitCode::FAILURE;
        }
    };

    let grid = CalendarGrid::new(month, availability, today);

    println!("\n{}", grid.month_title().bold().green());
    println!("{}", WEEKDAY_HEADER.join("  "));
    for week in grid.weeks() {
        let line: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(cell) => {
                    let day = format!("{:>2}", cell.day_of_month);
                    let styled = if cell.has_availability { day.green().bold() } else { day.dimmed() };
                    if cell.is_today { styled.underline().to_string() } else { styled.to_string() }
                }
            })
            .collect();
        println!("{}", line.join("  "));
    }

    if !grid.has_any_availability() {
        println!("\n{}", "No availability this month.".yellow());
        return ExitCode::SUCCESS;
    }

    for (date, slots) in grid.availability().iter().filter(|(date, _)| month.contains(*date)) {
        println!("\n{} ({} slots)", date.format("%a %Y-%m-%d").to_string().cyan(), slots.len());
        if let PickerView::Groups(groups) = TimeSlotPicker::new(slots.to_vec()).view() {
            for group in groups {
                let times: Vec<String> = group.slots.iter().map(ToString::to_string).collect();
                println!("  {:<10} {}", group.period.label(), times.join(" "));
            }
        }
    }

    ExitCode::SUCCESS
}
