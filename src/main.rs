use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use sheet_stack::config::SheetConfig;
use sheet_stack::history::MemoryHistory;
use sheet_stack::panels::default_registry;
use sheet_stack::SheetController;

mod cli;

use cli::{CliArgs, Step};

fn main() -> Result<()> {
    sheet_stack::tracing::init();

    let args = CliArgs::parse();
    let steps = args
        .parse_steps()
        .map_err(anyhow::Error::msg)
        .context("Invalid step")?;

    let config = match &args.config {
        Some(path) => SheetConfig::load_from(path),
        None => SheetConfig::load(),
    };
    let registry = default_registry().context("Sheet registry is incomplete")?;
    let history = MemoryHistory::new(args.url.clone());

    let mut controller = SheetController::new(config, history, registry);
    print_state("start", &controller);

    for step in steps {
        let label = format!("{:?}", step);
        match step {
            Step::Open { kind, props } => controller.open_sheet(kind, props),
            Step::CloseKind(kind) => controller.close_sheets_of_kind(kind),
            Step::Back => controller.navigate(-1),
            Step::Forward => controller.navigate(1),
            Step::Clear => controller.clear_all_sheets(),
            Step::Tick(ms) => controller.advance(Duration::from_millis(ms)),
        }
        print_state(&label, &controller);
    }

    Ok(())
}

fn print_state(label: &str, controller: &SheetController<MemoryHistory>) {
    println!("== {}", label);
    for sheet in controller.mounted() {
        let state = if sheet.is_visible() { "open" } else { "closing" };
        println!(
            "  [z={}] {} ({}, {}): {}",
            sheet.z_index, sheet.title, sheet.kind, state, sheet.body
        );
    }
    match controller.shareable_url() {
        Some(url) => println!("  url: {}", url),
        None => println!("  url: {} (not shareable)", controller.history().current().url),
    }
}
