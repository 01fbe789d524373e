//! Typesync Code Generator
//!
//! Generates a typed TypeScript client from a backend route manifest.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use typesync_gen::errors::GeneratorError;
use typesync_gen::naming::{
    DEFAULT_ARGS_TYPE_FORMAT, DEFAULT_FUNCTION_NAME_FORMAT, DEFAULT_RETURN_TYPE_FORMAT, NameFormats,
};
use typesync_gen::options::{DEFAULT_APIS_FILE, DEFAULT_TYPES_FILE, GenerateOptions, parse_translator_priority};
use typesync_gen::output::{generate_and_write, load_manifest};

/// Typesync code generator - turns backend route descriptors into a typed client
#[derive(Parser, Debug)]
#[command(name = "typesync-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the types and apis files into OUT_DIR
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Output directory for the generated files
    out_dir: PathBuf,

    /// Enable a translator (repeatable; all translators when omitted)
    #[arg(short = 't', long = "translator", value_name = "NAME")]
    translators: Vec<String>,

    /// Set a translator priority (repeatable)
    #[arg(long = "translator-priority", value_name = "NAME:PRIORITY", value_parser = parse_translator_priority)]
    translator_priorities: Vec<(String, i64)>,

    /// Skip endpoints without a response annotation
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    skip_unannotated: bool,

    /// Infer return types of unannotated endpoints
    #[arg(short = 'i', long)]
    inference: bool,

    /// Allow inference that evaluates backend code
    #[arg(long)]
    inference_can_eval: bool,

    /// File name of the types file
    #[arg(long, default_value = DEFAULT_TYPES_FILE)]
    types_file: String,

    /// File name of the apis file
    #[arg(long, default_value = DEFAULT_APIS_FILE)]
    apis_file: String,

    /// Format of return type names
    #[arg(long, default_value = DEFAULT_RETURN_TYPE_FORMAT)]
    return_type_format: String,

    /// Format of argument type names
    #[arg(long, default_value = DEFAULT_ARGS_TYPE_FORMAT)]
    args_type_format: String,

    /// Format of request function names
    #[arg(long, default_value = DEFAULT_FUNCTION_NAME_FORMAT)]
    function_name_format: String,

    /// Route manifest to generate from
    #[arg(long, default_value = "typesync-routes.json")]
    manifest: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl GenerateArgs {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            translators: self.translators.clone(),
            translator_priorities: self.translator_priorities.iter().cloned().collect(),
            skip_unannotated: self.skip_unannotated,
            inference: self.inference,
            inference_can_eval: self.inference_can_eval,
            types_file: self.types_file.clone(),
            apis_file: self.apis_file.clone(),
            formats: NameFormats {
                function_name: self.function_name_format.clone(),
                return_type: self.return_type_format.clone(),
                args_type: self.args_type_format.clone(),
            },
        }
    }
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            init_tracing(args.verbose);
            generate(&args)
        }
    }
}

/// Logs go to stderr; stdout carries only `Warning: ` lines and dry-run output.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}

#[tracing::instrument(skip(args), fields(out_dir = %args.out_dir.display()))]
fn generate(args: &GenerateArgs) -> Result<(), GeneratorError> {
    let manifest = load_manifest(&args.manifest)?;
    let options = args.options();

    let files = generate_and_write(&manifest, &options, &args.out_dir, args.dry_run)?;

    for warning in &files.warnings {
        println!("Warning: {warning}");
    }

    Ok(())
}
