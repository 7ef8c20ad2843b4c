mod cmd_khoj;
mod cmd_kunji;
mod cmd_varna;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

use naamkhoj_types::{Form, Scope};

#[derive(Parser)]
#[command(name = "naamkhoj", about = "Devanagari fuzzy name search over electoral rolls")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the normal forms and entity segmentation of a string
    Varna {
        /// Text to analyze
        text: String,
    },

    /// Show the posting-list keys a query generates
    Kunji {
        /// Query text
        query: String,

        /// Index form to build keys for (default: all three)
        #[arg(long, value_enum)]
        form: Option<FormArg>,
    },

    /// Search a JSON row snapshot
    Khoj {
        /// Query text
        query: String,

        /// Path to the snapshot (JSON array of rows)
        #[arg(long)]
        data: String,

        /// Restrict to these ACs (default: every AC in the snapshot)
        #[arg(long = "ac")]
        acs: Vec<u32>,

        /// Name field(s) to search
        #[arg(long, value_enum, default_value = "anywhere")]
        scope: ScopeArg,

        /// Exact scenarios only; no fuzzy families
        #[arg(long)]
        exact_only: bool,

        /// Keep only the best N hits
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum FormArg {
    Strict,
    Exact,
    Loose,
}

impl From<FormArg> for Form {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::Strict => Form::Strict,
            FormArg::Exact => Form::Exact,
            FormArg::Loose => Form::Loose,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum ScopeArg {
    Voter,
    Relative,
    Anywhere,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Voter => Scope::Voter,
            ScopeArg::Relative => Scope::Relative,
            ScopeArg::Anywhere => Scope::Anywhere,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Varna { text } => {
            cmd_varna::run(&text);
            ExitCode::SUCCESS
        }
        Commands::Kunji { query, form } => {
            cmd_kunji::run(&query, form.map(Form::from));
            ExitCode::SUCCESS
        }
        Commands::Khoj {
            query,
            data,
            acs,
            scope,
            exact_only,
            limit,
            format,
        } => cmd_khoj::run(
            &query,
            &data,
            acs,
            scope.into(),
            exact_only,
            limit,
            format,
        ),
    }
}
