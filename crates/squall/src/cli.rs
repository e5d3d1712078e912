//! Clap derive structures for the `squall` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// squall -- weather alerts from the command line
#[derive(Debug, Parser)]
#[command(
    name = "squall",
    version,
    about = "Manage weather alert rules from the command line",
    long_about = "A CLI for the squall weather-alert service.\n\n\
        Sign in once; the session token is stored in the system keyring\n\
        and restored on every invocation.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SQUALL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, env = "SQUALL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SQUALL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SQUALL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Sign out and discard the stored token
    Logout,

    /// Show the signed-in account and dashboard summary
    Status,

    /// Create a new account
    Register(RegisterArgs),

    /// Complete email verification for a new account
    VerifyEmail(VerifyEmailArgs),

    /// Re-send the email verification challenge
    ResendVerification(ResendVerificationArgs),

    /// Manage alert rules
    #[command(alias = "r")]
    Rules(RulesArgs),

    /// View and acknowledge triggered alerts
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Show current weather conditions
    #[command(alias = "w")]
    Weather(WeatherArgs),

    /// View and update your profile
    Profile(ProfileArgs),

    /// Administer pending account approvals
    Admin(AdminArgs),
}

// ── Session / account commands ───────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username to sign in as
    pub username: String,

    /// Password (read from the terminal when omitted)
    #[arg(long, env = "SQUALL_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username for the new account
    pub username: String,

    /// Email address to verify
    #[arg(long)]
    pub email: String,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Phone number for SMS notifications
    #[arg(long)]
    pub phone: Option<String>,

    /// Password (read from the terminal when omitted)
    #[arg(long, env = "SQUALL_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyEmailArgs {
    /// Account id from the registration response
    #[arg(long)]
    pub user_id: String,

    /// Verification id from the registration response
    #[arg(long)]
    pub verification_id: String,

    /// Token from the verification email
    pub token: String,
}

#[derive(Debug, Args)]
pub struct ResendVerificationArgs {
    /// Username whose verification email to re-send
    pub username: String,
}

// ── Rules ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List alert rules
    #[command(alias = "ls")]
    List,

    /// Create an alert rule
    Create(CreateRuleArgs),

    /// Delete an alert rule
    #[command(alias = "rm")]
    Delete {
        /// Rule id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleKindArg {
    /// Alert when temperature drops below the threshold
    TempBelow,
    /// Alert when temperature rises above the threshold
    TempAbove,
    /// Alert when wind speed exceeds the threshold
    Wind,
    /// Alert when rain probability reaches the threshold
    Rain,
}

#[derive(Debug, Args)]
pub struct CreateRuleArgs {
    /// Rule name
    #[arg(long, default_value = "Bring a Jacket")]
    pub name: String,

    /// Human-readable location label
    #[arg(long, default_value = "Orlando")]
    pub location: String,

    /// Latitude of the monitored point
    #[arg(long, default_value = "28.5383", allow_hyphen_values = true)]
    pub latitude: String,

    /// Longitude of the monitored point
    #[arg(long, default_value = "-81.3792", allow_hyphen_values = true)]
    pub longitude: String,

    /// Kind of condition to monitor
    #[arg(long, value_enum, default_value = "temp-below")]
    pub kind: RuleKindArg,

    /// Threshold value (defaults to the kind's preset when omitted)
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<String>,

    /// Temperature unit for display
    #[arg(long, default_value = "F")]
    pub unit: String,

    /// Monitor current conditions
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub monitor_current: bool,

    /// Monitor the forecast
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub monitor_forecast: bool,

    /// Forecast window in hours
    #[arg(long, default_value = "48")]
    pub forecast_window_hours: u32,

    /// Alert at most once per weather event
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    pub once_per_event: bool,

    /// Minutes before a rule re-arms after firing
    #[arg(long, default_value = "240")]
    pub rearm_window_minutes: u32,
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List triggered alerts, most recent first
    #[command(alias = "ls")]
    List,

    /// Acknowledge a sent alert
    Ack {
        /// Alert id
        id: String,
    },
}

// ── Weather ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WeatherArgs {
    /// Latitude (defaults to the first rule's coordinates)
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude (defaults to the first rule's coordinates)
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Display temperatures in this unit
    #[arg(long, default_value = "F")]
    pub unit: String,
}

// ── Profile ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in account
    Show,

    /// Update name and phone number
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List accounts waiting for approval
    Pending,

    /// Approve a pending account
    Approve {
        /// Account id
        id: String,
    },
}
