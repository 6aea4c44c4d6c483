// SPDX-License-Identifier: GPL-3.0-only
pub mod register;

pub use register::RegisterArgs;

#[derive(clap::Parser, Debug)]
#[command(name = "extreg")]
#[command(about = "Register Apex classes as extension providers in an org")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Register an Apex class as the provider of an extension point
    Register(RegisterArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_register_short_flags() {
        let cli = Cli::try_parse_from([
            "extreg",
            "register",
            "-r",
            "testRegExtension",
            "-e",
            "testEPN",
            "-a",
            "testApexClass",
            "-u",
            "testUserName",
        ])
        .unwrap();

        let Command::Register(args) = cli.command;
        assert_eq!(args.registered_extension_name, "testRegExtension");
        assert_eq!(args.extension_point_name, "testEPN");
        assert_eq!(args.apex_class_name, "testApexClass");
        assert_eq!(args.target_username.as_deref(), Some("testUserName"));
        assert!(!args.no_read_back);
        assert!(!args.json);
        assert!(!cli.log_json);
    }

    #[test]
    fn test_register_requires_class() {
        let result = Cli::try_parse_from(["extreg", "register", "-r", "testRegExtension", "-e", "testEPN"]);
        assert!(result.is_err());
    }
}
