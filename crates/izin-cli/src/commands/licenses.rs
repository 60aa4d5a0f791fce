//! License command implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use izin_client::SessionClient;
use izin_core::{LicenseApplication, LicenseKind};

use crate::output;

#[derive(Subcommand, Debug)]
pub enum LicenseCommand {
    /// List your license records
    List,
    /// Show a single license record
    Show(ShowArgs),
    /// Submit a new license application
    Apply(ApplyArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// License id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// License kind (business_registration, trade_permit, food_production, halal)
    #[arg(long)]
    pub kind: String,

    /// Name of the business the license is for
    #[arg(long)]
    pub business_name: String,

    /// Free-form notes for the reviewer
    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn run(client: &SessionClient, command: LicenseCommand) -> Result<()> {
    match command {
        LicenseCommand::List => list(client).await,
        LicenseCommand::Show(args) => show(client, args).await,
        LicenseCommand::Apply(args) => apply(client, args).await,
    }
}

async fn list(client: &SessionClient) -> Result<()> {
    let licenses = client
        .list_licenses()
        .await
        .context("Failed to list licenses")?;

    if licenses.is_empty() {
        println!("No licenses yet.");
        return Ok(());
    }

    output::json_pretty(&licenses)
}

async fn show(client: &SessionClient, args: ShowArgs) -> Result<()> {
    let license = client
        .get_license(&args.id)
        .await
        .context("Failed to fetch license")?;

    output::json_pretty(&license)
}

async fn apply(client: &SessionClient, args: ApplyArgs) -> Result<()> {
    let kind = parse_kind(&args.kind)?;

    let license = client
        .apply_for_license(&LicenseApplication {
            kind,
            business_name: args.business_name,
            notes: args.notes,
        })
        .await
        .context("Failed to submit application")?;

    output::success("Application submitted");
    output::field("License id", &license.id);
    output::json_pretty(&license)
}

fn parse_kind(kind: &str) -> Result<LicenseKind> {
    match kind {
        "business_registration" => Ok(LicenseKind::BusinessRegistration),
        "trade_permit" => Ok(LicenseKind::TradePermit),
        "food_production" => Ok(LicenseKind::FoodProduction),
        "halal" => Ok(LicenseKind::Halal),
        other => bail!(
            "Unknown license kind '{other}' (expected business_registration, trade_permit, food_production or halal)"
        ),
    }
}
