//! Command-line argument parsing for the demo runner
//!
//! Supports:
//! - Deep-linking with a starting URL
//! - A config file override
//! - A script of steps replayed against an in-memory history

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use sheet_stack::{Props, SheetKind};

/// Replay sheet operations against an in-memory browser history
#[derive(Parser, Debug)]
#[command(name = "sheet-stack", version, about = "Stacked sheet history simulator")]
pub struct CliArgs {
    /// URL the session starts on (may carry a sheet stack)
    #[arg(long, default_value = "https://admin.local/")]
    pub url: String,

    /// Config file (defaults to ~/.config/sheet-stack/config.yaml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Steps: `open KIND [JSON]`, `close-kind KIND`, `back`, `forward`,
    /// `clear`, `tick MS`
    #[arg(value_name = "STEPS")]
    pub steps: Vec<String>,
}

/// One scripted operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Open { kind: SheetKind, props: Props },
    CloseKind(SheetKind),
    Back,
    Forward,
    Clear,
    Tick(u64),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, rest) = s.split_once(' ').unwrap_or((s, ""));
        let rest = rest.trim();

        match verb {
            "open" => {
                let (kind, json) = rest.split_once(' ').unwrap_or((rest, ""));
                let kind = kind.parse::<SheetKind>()?;
                let props = parse_props(json.trim())?;
                Ok(Step::Open { kind, props })
            }
            "close-kind" => Ok(Step::CloseKind(rest.parse()?)),
            "back" => Ok(Step::Back),
            "forward" => Ok(Step::Forward),
            "clear" => Ok(Step::Clear),
            "tick" => rest
                .parse::<u64>()
                .map(Step::Tick)
                .map_err(|e| format!("Invalid tick '{}': {}", rest, e)),
            other => Err(format!("Unknown step '{}'", other)),
        }
    }
}

fn parse_props(json: &str) -> Result<Props, String> {
    if json.is_empty() {
        return Ok(Props::new());
    }
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(format!("Props must be a JSON object: {}", json)),
        Err(e) => Err(format!("Invalid props JSON '{}': {}", json, e)),
    }
}

impl CliArgs {
    /// Parse every scripted step, failing on the first bad one
    pub fn parse_steps(&self) -> Result<Vec<Step>, String> {
        self.steps.iter().map(|s| s.parse()).collect()
    }
}
