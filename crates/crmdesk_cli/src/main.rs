//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load configuration, seed the stores and print the dashboard, the
//!   pipeline board and the latest activities.
//! - Verify `crmdesk_core` wiring outside any UI host.
//!
//! Usage: `crmdesk_cli [config.json] [stage ...]`. Stage names pick the
//! board columns (default: prospect, negotiation, closed). `CRMDESK_*`
//! environment variables override file values.

use crmdesk_core::{
    core_version, format_currency, format_percent, init_from_config, Crm, CrmConfig, DealStage,
    UnknownStage, DEFAULT_RECENT_LIMIT,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let stages = match parse_stages(args) {
        Ok(stages) => stages,
        Err(err) => {
            eprintln!("crmdesk: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = match CrmConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("crmdesk: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_from_config(&config) {
        eprintln!("crmdesk: {err}");
        return ExitCode::FAILURE;
    }

    let crm = match Crm::from_config(&config) {
        Ok(crm) => crm,
        Err(err) => {
            log::error!("event=cli_start module=cli status=error reason={err}");
            eprintln!("crmdesk: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("crmdesk_core version={}", core_version());

    let metrics = crm.dashboard().snapshot(crm.now()).await;
    println!();
    println!("Pipeline value   {}", format_currency(metrics.total_pipeline_value));
    println!("Closed revenue   {}", format_currency(metrics.closed_value));
    println!("Conversion rate  {}", format_percent(metrics.conversion_rate));
    println!("Contacts         {}", metrics.total_contacts);
    println!("Deals            {}", metrics.total_deals);
    println!("Leads            {}", metrics.total_leads);
    println!(
        "Pending tasks    {} ({} overdue)",
        metrics.pending_tasks, metrics.overdue_tasks_count
    );

    let board = crm.pipeline().board(&stages).await;
    println!();
    for column in &board.columns {
        println!(
            "{} ({}) total {}",
            column.stage.label(),
            column.count(),
            format_currency(column.total)
        );
        for deal in &column.deals {
            println!("  - {} / {} {}", deal.name, deal.company, format_currency(deal.value));
        }
    }

    println!();
    println!("Recent activity");
    for activity in crm.activities().recent(DEFAULT_RECENT_LIMIT).await {
        println!(
            "  {} {:?}: {}",
            activity.timestamp.format("%Y-%m-%d %H:%M"),
            activity.kind,
            activity.description
        );
    }

    ExitCode::SUCCESS
}

fn parse_stages(names: impl Iterator<Item = String>) -> Result<Vec<DealStage>, UnknownStage> {
    let stages = names
        .map(|name| name.parse::<DealStage>())
        .collect::<Result<Vec<_>, _>>()?;
    if stages.is_empty() {
        return Ok(DealStage::BOARD.to_vec());
    }
    Ok(stages)
}
