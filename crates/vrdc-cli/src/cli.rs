//! CLI argument definitions for the entity catalog tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use vrdc_model::{IdentifierLevel, YearMonth};

#[derive(Parser)]
#[command(
    name = "vrdc-entity",
    version,
    about = "VRDC entity identifier catalog - resolve fields, select lists and extraction plans",
    long_about = "Inspect the entity identifier columns (TIN, CCN, organizational and personal NPI)\n\
                  of each VRDC RIF benefit setting.\n\n\
                  Builds SQL select lists, enumerates single-column-per-level extraction plans\n\
                  and maps them onto the canonical five-column entity schema."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Catalog file to use instead of the embedded catalog.
    ///
    /// Falls back to VRDC_CATALOG_PATH, then to the embedded catalog.
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List benefit settings with their present levels and plan counts.
    Settings,

    /// Show every identifier field of one setting.
    Fields(SettingArgs),

    /// Show one identifier level across all settings.
    Level(LevelArgs),

    /// Print the SQL select list for a setting.
    Select(SelectArgs),

    /// Enumerate single-field-per-level extraction plans.
    Permutations(PermutationArgs),

    /// Print canonical five-column projections, one per plan.
    Canonical(CanonicalArgs),

    /// Print database and table names for a setting and month.
    Tables(TablesArgs),

    /// List monthly extracts over a range of months.
    Months(MonthsArgs),

    /// Print a catalog report as JSON.
    Doctor,
}

#[derive(Args)]
pub struct SettingArgs {
    /// Benefit setting (bcarrier, dme, inpatient, outpatient, snf, hospice, hha).
    #[arg(value_name = "SETTING")]
    pub setting: String,
}

#[derive(Args)]
pub struct LevelArgs {
    /// Identifier level (tax_id, ccn, org_npi, personal_npi).
    #[arg(value_name = "LEVEL")]
    pub level: IdentifierLevel,
}

#[derive(Args)]
pub struct SelectArgs {
    #[arg(value_name = "SETTING")]
    pub setting: String,

    /// Qualify columns with the database and tables of this month (YYYY-MM).
    #[arg(long = "period", value_name = "YYYY-MM")]
    pub period: Option<YearMonth>,

    /// Alias organizational NPI columns as onpi and personal NPI columns as pnpi.
    #[arg(long = "simplified-npi-aliases")]
    pub simplified_npi_aliases: bool,
}

#[derive(Args)]
pub struct PermutationArgs {
    #[arg(value_name = "SETTING")]
    pub setting: String,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: PlanFormatArg,
}

#[derive(Args)]
pub struct CanonicalArgs {
    #[arg(value_name = "SETTING")]
    pub setting: String,

    /// Render full queries against the tables of this month (YYYY-MM).
    #[arg(long = "period", value_name = "YYYY-MM")]
    pub period: Option<YearMonth>,
}

#[derive(Args)]
pub struct TablesArgs {
    #[arg(value_name = "SETTING")]
    pub setting: String,

    #[arg(long = "period", value_name = "YYYY-MM")]
    pub period: YearMonth,
}

#[derive(Args)]
pub struct MonthsArgs {
    /// First month of the range (YYYY-MM).
    #[arg(long = "from", value_name = "YYYY-MM")]
    pub from: YearMonth,

    /// Last month of the range, inclusive (YYYY-MM).
    #[arg(long = "to", value_name = "YYYY-MM")]
    pub to: YearMonth,

    /// Settings to include (repeatable; default: all).
    #[arg(long = "setting", value_name = "SETTING")]
    pub settings: Vec<String>,

    /// Print each extract's select list instead of the table listing.
    #[arg(long = "sql")]
    pub sql: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlanFormatArg {
    Table,
    Json,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select_with_period() {
        let cli = Cli::try_parse_from([
            "vrdc-entity",
            "select",
            "dme",
            "--period",
            "2024-01",
            "--simplified-npi-aliases",
        ])
        .unwrap();
        match cli.command {
            Command::Select(args) => {
                assert_eq!(args.setting, "dme");
                assert_eq!(args.period, Some(YearMonth::new(2024, 1).unwrap()));
                assert!(args.simplified_npi_aliases);
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn rejects_bad_level_and_month() {
        assert!(Cli::try_parse_from(["vrdc-entity", "level", "npi"]).is_err());
        assert!(
            Cli::try_parse_from([
                "vrdc-entity",
                "tables",
                "dme",
                "--period",
                "2024-13"
            ])
            .is_err()
        );
    }

    #[test]
    fn months_collects_repeated_settings() {
        let cli = Cli::try_parse_from([
            "vrdc-entity",
            "--catalog",
            "custom.toml",
            "months",
            "--from",
            "2023-12",
            "--to",
            "2024-01",
            "--setting",
            "snf",
            "--setting",
            "hha",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Command::Months(args) => assert_eq!(args.settings, vec!["snf", "hha"]),
            _ => panic!("expected months"),
        }
    }
}
