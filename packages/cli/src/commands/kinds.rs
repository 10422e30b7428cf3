use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagebuilder_editor::KindRegistry;
use pagebuilder_model::KindCategory;

#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Only list container kinds
    #[arg(long)]
    pub containers: bool,
}

pub fn kinds(args: KindsArgs) -> Result<()> {
    let registry = KindRegistry::builtin();

    println!("{}", "🧱 Element kinds".bright_blue().bold());

    for spec in registry.kinds() {
        let category = spec.kind.category();
        if args.containers && category != KindCategory::Container {
            continue;
        }

        let category = match category {
            KindCategory::Container => "container".cyan(),
            KindCategory::Record => "record".normal(),
        };

        println!("  {:<12} {:<10} {}", spec.kind.as_str().bright_white(), category, spec.label);
    }

    Ok(())
}
