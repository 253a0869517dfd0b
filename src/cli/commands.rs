//! CLI command definitions

use crate::application::BuildOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postpage")]
#[command(about = "Render a directory of text posts into a single HTML page", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Build options used when no command is given; they cannot be
    /// combined with a command
    #[command(flatten)]
    pub build: BuildArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the site (the default when no command is given)
    Build(BuildArgs),

    /// Render one template file to stdout
    Render {
        /// Template file to render
        template: PathBuf,

        /// Text variable available to the template (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    /// List available filters
    Filters,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    /// Directory containing post files (*.txt)
    #[arg(long, env = "POSTPAGE_POSTS", default_value = "posts")]
    pub posts: PathBuf,

    /// Output directory for index.html
    #[arg(long, env = "POSTPAGE_OUT", default_value = "_site")]
    pub out: PathBuf,

    /// Directory with page.html / post.html overrides
    #[arg(long, env = "POSTPAGE_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Include posts in subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

impl From<BuildArgs> for BuildOptions {
    fn from(args: BuildArgs) -> Self {
        BuildOptions {
            posts_dir: args.posts,
            output_dir: args.out,
            template_dir: args.templates,
            recursive: args.recursive,
        }
    }
}
