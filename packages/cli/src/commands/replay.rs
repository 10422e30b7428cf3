use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::{render_outline_with, Action, DispatchResult, EditError, Editor, OutlineOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON file holding an array of actions
    pub script: PathBuf,

    /// Fail if any action had no effect (overrides config)
    #[arg(long)]
    pub strict: bool,

    /// Print the final tree as JSON instead of an outline
    #[arg(long)]
    pub json: bool,

    /// Include styles in the outline
    #[arg(long)]
    pub styles: bool,
}

/// What happened to each action of a script
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub applied: usize,
    /// (position in script, action name, reason)
    pub noops: Vec<(usize, &'static str, EditError)>,
}

/// Dispatch `actions` in order; no-ops are recorded, not fatal
pub fn replay_actions(editor: &mut Editor, actions: Vec<Action>) -> ReplayReport {
    let mut report = ReplayReport::default();

    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        match editor.dispatch(action) {
            DispatchResult::Applied { .. } => report.applied += 1,
            DispatchResult::Noop { reason } => report.noops.push((index, name, reason)),
        }
    }

    report
}

pub fn replay(args: ReplayArgs, config: &Config) -> Result<()> {
    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid action script {}", args.script.display()))?;

    println!(
        "{} {} actions from {}",
        "▶️".bright_blue(),
        actions.len(),
        args.script.display()
    );

    let mut editor = Editor::new(config.page_name.clone());
    let report = replay_actions(&mut editor, actions);

    for (index, name, reason) in &report.noops {
        println!("  {} #{} {} had no effect: {}", "–".yellow(), index, name, reason);
    }

    println!(
        "  {} {} applied, {} no-op, version {}",
        "✓".green(),
        report.applied,
        report.noops.len(),
        editor.version()
    );
    println!();

    if args.json {
        println!("{}", serde_json::to_string_pretty(editor.tree())?);
    } else {
        let options = OutlineOptions {
            selected: editor.state().selected_id().cloned(),
            show_styles: args.styles,
        };
        print!("{}", render_outline_with(editor.tree(), editor.registry(), &options));
    }

    if (args.strict || config.strict) && !report.noops.is_empty() {
        return Err(anyhow!("{} action(s) had no effect", report.noops.len()));
    }

    Ok(())
}
