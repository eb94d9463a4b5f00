//! Command-line interface for the realty service binary.

use clap::Parser;
use clap::Subcommand;

use crate::domain::user::models::UserRole;

#[derive(Parser, Debug)]
#[command(
    name = "realty-service",
    version,
    about = "Realty backend authentication service",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,

    /// Print a product key for a privileged signup and exit
    ///
    /// Uses the configured product key secret. Intended for bootstrapping
    /// the first administrator.
    #[command(name = "product-key")]
    ProductKey {
        /// Email the key is bound to
        #[arg(long)]
        email: String,

        /// Role the key is bound to (REALTOR or ADMIN)
        #[arg(long, value_parser = parse_role)]
        role: UserRole,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

fn parse_role(s: &str) -> Result<UserRole, String> {
    s.parse::<UserRole>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["realty-service"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn test_product_key_command() {
        let cli = Cli::try_parse_from([
            "realty-service",
            "product-key",
            "--email",
            "root@example.com",
            "--role",
            "admin",
        ])
        .unwrap();

        assert_eq!(
            cli.command(),
            Command::ProductKey {
                email: "root@example.com".to_string(),
                role: UserRole::Admin,
            }
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(Cli::try_parse_from([
            "realty-service",
            "product-key",
            "--email",
            "root@example.com",
            "--role",
            "landlord",
        ])
        .is_err());
    }
}
