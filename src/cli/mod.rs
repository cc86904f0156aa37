//! Command-line front-end: argument parsing, the line-mode console that
//! drives the wizards, and table output for the list commands.

pub mod args;
pub mod console;
pub mod render;

use crate::backend::{Backend, MockBackend};
use crate::config::Config;
use crate::directory::{
    CourtFilter, CourtStatusCounts, DashboardStats, FacilityFilter, StaffFilter,
};
use crate::domain::ids::{CourtId, FacilityId, UserId};
use crate::flows::login::AuthMode;
use crate::flows::password_reset::PasswordReset;
use crate::flows::{court, facility, login, staff};
use anyhow::{Result, anyhow};
use args::Command;
use console::Console;
use render::Theme;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub fn execute(command: Command, config: &Config, theme: Theme) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), theme);
    let mut backend = MockBackend::from_config(config);
    run(command, config, &mut console, &mut backend)
}

pub fn run<R: BufRead, W: Write>(
    command: Command,
    config: &Config,
    console: &mut Console<R, W>,
    backend: &mut MockBackend,
) -> Result<()> {
    debug!(?command, "running command");
    match command {
        Command::RegisterFacility => {
            let mut session = facility::session(&config.facility)?;
            let mut submit = facility::submitter(backend);
            if let Some(created) = console.run_wizard(&mut session, &mut submit)? {
                console.success(&format!(
                    "Facility #{} \"{}\" registered and pending approval.",
                    created.id, created.name
                ))?;
                console.line(&serde_json::to_string_pretty(&created)?)?;
            }
        }
        Command::EditFacility { id } => {
            let current = backend
                .facilities()?
                .into_iter()
                .find(|f| f.id == FacilityId(id))
                .ok_or_else(|| anyhow!("no facility with id {id}"))?;
            let mut session = facility::edit_session(&current)?;
            let mut submit = facility::edit_submitter(backend, current.id);
            if let Some(updated) = console.run_wizard(&mut session, &mut submit)? {
                console.success(&format!(
                    "Facility \"{}\" updated: open {}.",
                    updated.name,
                    updated.hours()
                ))?;
            }
        }
        Command::Facilities {
            search,
            status,
            json,
        } => {
            let facilities = backend.facilities()?;
            let courts = backend.courts()?;
            let filter = FacilityFilter {
                search: search.unwrap_or_default(),
                status,
            };
            let hits = filter.apply(&facilities);
            if json {
                console.line(&serde_json::to_string_pretty(&hits)?)?;
            } else if facilities.is_empty() {
                console.hint(
                    "No facilities yet. Register your first one with `courtside register-facility`.",
                )?;
            } else if hits.is_empty() {
                console.hint("No facilities match.")?;
            } else {
                let rendered = render::facilities_table(&hits, &courts).render(console.theme());
                console.line(rendered.trim_end())?;
            }
        }
        Command::AddCourt { facility } => {
            let mut session = court::session()?;
            let mut submit = court::submitter(backend, FacilityId(facility));
            if let Some(created) = console.run_wizard(&mut session, &mut submit)? {
                console.success(&format!(
                    "Court #{} \"{}\" added with {} pricing slot(s).",
                    created.id,
                    created.name,
                    created.prices.len()
                ))?;
                console.line(&serde_json::to_string_pretty(&created)?)?;
            }
        }
        Command::CreateStaff => {
            let facilities = backend.facilities()?;
            let mut session = staff::session(&facilities, config.password.min_length)?;
            let password = staff::fill_generated_password(&mut session);
            console.hint(&format!(
                "Generated password: {password} (press Enter at the password prompt to keep it)"
            ))?;
            let mut submit = staff::submitter(backend);
            if let Some(created) = console.run_wizard(&mut session, &mut submit)? {
                console.success(&format!(
                    "Staff account for {} <{}> created.",
                    created.full_name(),
                    created.email
                ))?;
            }
        }
        Command::Login { sign_up } => {
            let mode = if sign_up {
                AuthMode::SignUp
            } else {
                AuthMode::SignIn
            };
            let mut session = login::session(mode)?;
            let mut submit = login::submitter(backend);
            if let Some(user) = console.run_wizard(&mut session, &mut submit)? {
                console.success(&format!("Signed in as {} ({}).", user.full_name(), user.role))?;
            }
        }
        Command::ResetPassword => {
            let mut flow = PasswordReset::from_config(config);
            console.run_password_reset(&mut flow, backend, |b: &MockBackend, channel| {
                b.issued_code(channel).map(str::to_string)
            })?;
        }
        Command::Courts {
            search,
            facility,
            status,
            json,
        } => {
            let courts = backend.courts()?;
            let facilities = backend.facilities()?;
            let filter = CourtFilter {
                search: search.unwrap_or_default(),
                facility: facility.map(FacilityId),
                status,
            };
            let hits = filter.apply(&courts);
            if json {
                console.line(&serde_json::to_string_pretty(&hits)?)?;
            } else if hits.is_empty() {
                console.hint("No courts match.")?;
            } else {
                let rendered = render::courts_table(&hits, &facilities).render(console.theme());
                console.line(rendered.trim_end())?;
                let counts = CourtStatusCounts::count(hits.iter().copied());
                console.hint(&render::status_summary(&counts))?;
            }
        }
        Command::SetCourtStatus { id, status } => {
            let court = backend.set_court_status(CourtId(id), status)?;
            console.success(&format!("Court \"{}\" is now {}.", court.name, court.status))?;
        }
        Command::RemoveCourt { id } => {
            backend.delete_court(CourtId(id))?;
            console.success(&format!("Court #{id} deleted."))?;
        }
        Command::SetStaffStatus { id, status } => {
            let status = match status {
                Some(status) => status,
                None => backend
                    .staff()?
                    .iter()
                    .find(|u| u.id == UserId(id))
                    .map(|u| u.status.toggled())
                    .ok_or_else(|| anyhow!("no staff member with id {id}"))?,
            };
            let user = backend.set_staff_status(UserId(id), status)?;
            console.success(&format!("{} is now {}.", user.full_name(), user.status))?;
        }
        Command::RemoveStaff { id } => {
            backend.delete_staff(UserId(id))?;
            console.success(&format!("Staff member #{id} removed."))?;
        }
        Command::Staff { search, json } => {
            let staff = backend.staff()?;
            let filter = StaffFilter {
                search: search.unwrap_or_default(),
            };
            let hits = filter.apply(&staff);
            if json {
                console.line(&serde_json::to_string_pretty(&hits)?)?;
            } else if hits.is_empty() {
                console.hint("No staff members match.")?;
            } else {
                let rendered = render::staff_table(&hits).render(console.theme());
                console.line(rendered.trim_end())?;
            }
        }
        Command::Dashboard { json } => {
            let stats = DashboardStats::collect(
                &backend.facilities()?,
                &backend.courts()?,
                &backend.staff()?,
                backend.activity()?,
            );
            if json {
                console.line(&serde_json::to_string_pretty(&stats)?)?;
            } else {
                let rendered = render::dashboard_table(&stats).render(console.theme());
                console.line(rendered.trim_end())?;
            }
        }
    }
    Ok(())
}
