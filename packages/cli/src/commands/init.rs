use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

pub const EXAMPLE_SCRIPT_NAME: &str = "example.actions.json";

const EXAMPLE_SCRIPT: &str = r#"[
  {
    "type": "ADD_ELEMENT",
    "payload": {
      "containerId": "__body",
      "elementDetails": {
        "id": "hero",
        "type": "section",
        "name": "Hero",
        "styles": { "padding": "32px" },
        "content": []
      }
    }
  },
  {
    "type": "ADD_ELEMENT",
    "payload": {
      "containerId": "hero",
      "elementDetails": {
        "id": "headline",
        "type": "text",
        "name": "Headline",
        "styles": { "fontSize": 32 },
        "content": { "innerText": "Welcome" }
      }
    }
  },
  {
    "type": "CHANGE_CLICKED_ELEMENT",
    "payload": { "elementDetails": { "id": "headline" } }
  }
]
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page name used to seed element ids
    #[arg(short, long, default_value = "page")]
    pub page_name: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing page builder project...".bright_blue().bold());

    let example_path = PathBuf::from(cwd).join(EXAMPLE_SCRIPT_NAME);
    if !example_path.exists() {
        fs::write(&example_path, EXAMPLE_SCRIPT)?;
        println!("  {} Created {}", "✓".green(), EXAMPLE_SCRIPT_NAME);
    }

    let config = Config {
        page_name: args.page_name,
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", EXAMPLE_SCRIPT_NAME);
    println!("  2. Run: pagebuilder replay {}", EXAMPLE_SCRIPT_NAME);

    Ok(())
}
