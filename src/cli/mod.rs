pub mod completions;
pub mod export;
pub mod init;
pub mod list;
pub mod run;

use clap::{Args, Parser, Subcommand};

use crate::export::{DryRun, ImageTool, MagickTool};

/// atlas-extract - Cut named sprites out of TexturePacker atlases
#[derive(Parser, Debug)]
#[command(name = "atlas-extract")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print tool command lines and other detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    // `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the batch from atlas-extract.yaml (or the builtin batch)
    Run(run::RunArgs),

    /// Export sprites from a single atlas
    Export(export::ExportArgs),

    /// List the frames of an atlas
    List(list::ListArgs),

    /// Write the builtin batch as atlas-extract.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(run::RunArgs::default())
    }
}

/// Image tool selection shared by `run` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// Image tool program (default: convert, or the manifest's `tool`)
    #[arg(long)]
    pub tool: Option<String>,

    /// Print tool command lines instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

impl ToolArgs {
    /// Build the tool, preferring `--tool` over `fallback`.
    pub fn build(&self, fallback: &str) -> Box<dyn ImageTool> {
        let program = self.tool.clone().unwrap_or_else(|| fallback.to_string());
        if self.dry_run {
            Box::new(DryRun::new(program))
        } else {
            Box::new(MagickTool::new(program))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_means_run() {
        let cli = Cli::try_parse_from(["atlas-extract"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(Commands::default(), Commands::Run(_)));
    }

    #[test]
    fn test_tool_override() {
        let args = ToolArgs {
            tool: Some("magick".to_string()),
            dry_run: false,
        };
        assert_eq!(args.build("convert").program(), "magick");
        assert_eq!(ToolArgs::default().build("convert").program(), "convert");
    }

    #[test]
    fn test_parse_export_command() {
        let cli = Cli::try_parse_from([
            "atlas-extract",
            "export",
            "ui.plist",
            "a.png",
            "b.png",
            "--alias",
            "b.png=btn.png",
            "-o",
            "dist",
            "--dry-run",
        ])
        .unwrap();

        let Some(Commands::Export(args)) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.names, vec!["a.png", "b.png"]);
        assert_eq!(args.aliases, vec![("b.png".to_string(), "btn.png".to_string())]);
        assert!(args.tool.dry_run);
    }
}
