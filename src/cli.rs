//! CLI: schema → (transpile | tokens | model)
use std::path::PathBuf;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use gql_tg::config::{DEFAULT_INDENT, EmissionOrder, TranspileOptions};
use gql_tg::tokenizer::Tokenized;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript type definitions from a GraphQL schema file
#[derive(Parser, Debug)]
#[command(name = "gql-tg", version)]
pub struct CommandLineInterface {
    /// debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// transpile a schema into TypeScript declarations
    Transpile(TranspileOut),
    /// print the tokenized definitions, one per line
    Tokens(TokensOut),
    /// print the resolved schema model as JSON
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// input .graphql schema file
    #[arg(long, short)]
    input: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct TranspileOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// omit the generated-file comment
    #[arg(long)]
    no_header: bool,

    /// keep the header but leave out the generation time
    #[arg(long)]
    no_timestamp: bool,

    /// declaration order of non-scalar types
    #[arg(long, value_enum, default_value_t = EmissionOrder::Declaration)]
    order: EmissionOrder,

    /// indentation for interface fields and enum members
    #[arg(long, default_value = DEFAULT_INDENT)]
    indent: String,
}

#[derive(clap::Parser, Debug)]
struct TokensOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TranspileOut {
    fn options(&self) -> TranspileOptions {
        TranspileOptions {
            header: !self.no_header,
            timestamp: !self.no_timestamp,
            order: self.order,
            indent: self.indent.clone(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Transpile(target) => {
                let input = &target.input_settings.input;
                let options = target.options();
                match target.out.as_ref() {
                    Some(out) => {
                        let transpiled = gql_tg::transpile_file(input, out, &options)?;
                        eprintln!(
                            "{} {} type definitions into {}",
                            "Transpiled".green().bold(),
                            transpiled.declarations,
                            out.display().to_string().cyan(),
                        );
                    }
                    None => {
                        let source = gql_tg::io::read_schema(input)?;
                        let transpiled = gql_tg::transpile_source(&source, &options)?;
                        print!("{}", transpiled.output);
                    }
                }
            }
            Command::Tokens(target) => {
                let tokens = Tokenized::from_path(&target.input_settings.input)?;
                // root operations first, then the remaining definitions
                for definition in tokens.root_operations.iter().chain(&tokens.non_scalars) {
                    println!("{definition}");
                }
            }
            Command::Model(target) => {
                let tokens = Tokenized::from_path(&target.input_settings.input)?;
                let model = gql_tg::parser::parse(&tokens)?;
                let model_src = serde_json::to_string_pretty(&model)
                    .context("failed to serialize schema model")?;
                if let Some(out) = target.out.as_ref() {
                    gql_tg::io::write_atomic(out, &model_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{model_src}");
                }
            }
        }
        Ok(())
    }
}
