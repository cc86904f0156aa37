use crate::domain::court::CourtStatus;
use crate::domain::facility::FacilityStatus;
use crate::domain::user::UserStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "courtside")]
#[command(about = "Badminton facility management console")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new facility (pending approval)
    RegisterFacility,

    /// Edit a facility's description and opening hours
    EditFacility {
        /// Facility id
        id: u64,
    },

    /// List facilities
    Facilities {
        /// Case-insensitive match on name or address
        #[arg(short, long)]
        search: Option<String>,

        /// Status code or label (A, I, P)
        #[arg(long)]
        status: Option<FacilityStatus>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a court with pricing slots to a facility
    AddCourt {
        /// Facility the court belongs to
        #[arg(short, long)]
        facility: u64,
    },

    /// Create a staff account
    CreateStaff,

    /// Sign in, or create a customer account
    Login {
        /// Create an account instead of signing in
        #[arg(long)]
        sign_up: bool,
    },

    /// Reset a forgotten password by code or link
    ResetPassword,

    /// List courts
    Courts {
        /// Case-insensitive match on the court name
        #[arg(short, long)]
        search: Option<String>,

        /// Only courts of this facility
        #[arg(short, long)]
        facility: Option<u64>,

        /// Status code or label (A, I, M)
        #[arg(long)]
        status: Option<CourtStatus>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Change a court's status
    SetCourtStatus {
        /// Court id
        id: u64,

        /// New status code or label (A, I, M)
        status: CourtStatus,
    },

    /// Delete a court and its pricing slots
    RemoveCourt {
        /// Court id
        id: u64,
    },

    /// List staff members
    Staff {
        /// Case-insensitive match on name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Activate or deactivate a staff account
    SetStaffStatus {
        /// Staff member id
        id: u64,

        /// New status (A or I); flips the current one when omitted
        #[arg(long)]
        status: Option<UserStatus>,
    },

    /// Remove a staff account
    RemoveStaff {
        /// Staff member id
        id: u64,
    },

    /// Owner dashboard figures
    Dashboard {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn courts_filters_parse() {
        let cli = Cli::parse_from([
            "courtside", "courts", "--search", "a1", "-f", "1", "--status", "M", "--json",
        ]);
        match cli.command {
            Command::Courts {
                search,
                facility,
                status,
                json,
            } => {
                assert_eq!(search.as_deref(), Some("a1"));
                assert_eq!(facility, Some(1));
                assert_eq!(status, Some(CourtStatus::Maintenance));
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["courtside", "add-court", "--facility", "2", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::AddCourt { facility: 2 }));
    }

    #[test]
    fn staff_status_is_optional() {
        let cli = Cli::parse_from(["courtside", "set-staff-status", "3"]);
        assert!(matches!(cli.command, Command::SetStaffStatus { id: 3, status: None }));
        let cli = Cli::parse_from(["courtside", "set-court-status", "2", "I"]);
        assert!(matches!(
            cli.command,
            Command::SetCourtStatus {
                id: 2,
                status: CourtStatus::Inactive
            }
        ));
    }

    #[test]
    fn facility_commands_parse() {
        let cli = Cli::parse_from(["courtside", "facilities", "--status", "pending", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Facilities {
                search: None,
                status: Some(FacilityStatus::Pending),
                json: true
            }
        ));
        let cli = Cli::parse_from(["courtside", "edit-facility", "2"]);
        assert!(matches!(cli.command, Command::EditFacility { id: 2 }));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["courtside", "courts", "--status", "X"]).is_err());
    }
}
