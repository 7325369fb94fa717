// Command-line surface. Positionals left out on the command line are asked
// for on stdin by the dispatcher (see `ui::arg_or_prompt`).

use crate::workflows::person_group::PersonGroupOptions;
use clap::{Args, Parser, Subcommand};

/// Face API command-line client
#[derive(Parser, Debug)]
#[command(name = "face", version, arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Store the service key in the face.key file
    Key {
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Detect faces in an image given by URL or file path
    Detect {
        #[arg(value_name = "URL|FILE")]
        source: Option<String>,
    },
    /// Upload and train a person group, or list/create/delete one
    #[command(
        after_help = "Forms:\n  \
            persongroup -list                 list all person groups\n  \
            persongroup <name> <path>         upload and train, one subdirectory per person\n  \
            persongroup <name> -list          list people in the group\n  \
            persongroup <name> -listjson      list people in the group as json\n  \
            persongroup <name> -create        create the group\n  \
            persongroup <name> -delete        delete the group\n\n\
            Flags must come before <name>."
    )]
    Persongroup(PersonGroupArgs),
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct PersonGroupArgs {
    /// Delete and recreate the group before uploading
    #[arg(long)]
    pub recreate: bool,

    /// Abort on the first failed face upload
    #[arg(long)]
    pub fail_fast: bool,

    /// Group name, or -list for all groups
    #[arg(allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Photo directory, or one of -list, -listjson, -create, -delete
    #[arg(allow_hyphen_values = true, value_name = "PATH|ACTION")]
    pub target: Option<String>,
}

impl PersonGroupArgs {
    pub fn options(&self) -> PersonGroupOptions {
        PersonGroupOptions {
            recreate: self.recreate,
            continue_on_upload_error: !self.fail_fast,
        }
    }
}

/// What the `persongroup` target argument asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    List,
    ListJson,
    Create,
    Delete,
    Train(String),
}

impl GroupAction {
    pub fn parse(target: &str) -> Self {
        match target {
            "-list" => GroupAction::List,
            "-listjson" => GroupAction::ListJson,
            "-create" => GroupAction::Create,
            "-delete" => GroupAction::Delete,
            path => GroupAction::Train(path.to_string()),
        }
    }
}
