//! NWTA QR command-line entrypoint

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nwta_qr::output::{Rendered, render_catalog, render_decoded, render_error, render_generated};
use nwta_qr::{AppConfig, Error, Generated, Generator, InputForm, QrDecoder, Result, logging, prompt};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "nwta-qr",
    version,
    about = "Generate captioned NWTA work-order QR images"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to nwta-qr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a QR image from command-line fields
    Generate {
        /// Task selection: a code such as `14` or `"14 - Reparación principal"`
        #[arg(long, default_value = "")]
        task: String,

        /// Order code
        #[arg(long, default_value = "")]
        order: String,

        /// MU code
        #[arg(long, default_value = "")]
        mu: String,

        /// Address
        #[arg(long, default_value = "")]
        address: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Fill in the form interactively
    Form {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List the task catalog
    Tasks,

    /// Read the record back out of a generated image
    Decode {
        /// Image to decode
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Directory to write the image to (overrides configuration)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the QR symbol to the terminal after generating
    #[arg(long)]
    preview: bool,
}

struct OutputSinks {
    json: bool,
}

impl OutputSinks {
    fn emit(&self, rendered: &Rendered) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rendered.json)?);
        } else {
            for line in &rendered.human {
                println!("{line}");
            }
        }
        Ok(())
    }

    fn emit_error(&self, err: &Error) {
        let rendered = render_error(err);
        if self.json {
            match serde_json::to_string_pretty(&rendered.json) {
                Ok(text) => println!("{text}"),
                Err(_) => eprintln!("{err}"),
            }
        } else {
            for line in &rendered.human {
                eprintln!("{line}");
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let sinks = OutputSinks { json: cli.json };

    match run(cli, &sinks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(err) => sinks.emit_error(err),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, sinks: &OutputSinks) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let catalog = config.task_catalog()?;
    debug!(tasks = catalog.len(), "Loaded task catalog");

    match cli.command {
        Command::Tasks => sinks.emit(&render_catalog(&catalog))?,
        Command::Decode { path } => {
            let payload = QrDecoder::new()
                .decode_file(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            sinks.emit(&render_decoded(&payload))?;
        }
        Command::Generate {
            task,
            order,
            mu,
            address,
            target,
        } => {
            let form = InputForm::new(task, order, mu, address);
            let generator = build_generator(&config, &catalog, &target)?;
            let generated = generator.generate(&form)?;
            report(sinks, &generator, &generated, target.preview)?;
        }
        Command::Form { target } => {
            let stdin = io::stdin();
            let form = prompt::read_form(&catalog, &mut stdin.lock(), &mut io::stdout())?;
            let generator = build_generator(&config, &catalog, &target)?;
            let generated = generator.generate(&form)?;
            report(sinks, &generator, &generated, target.preview)?;
        }
    }

    Ok(())
}

fn build_generator<'a>(
    config: &AppConfig,
    catalog: &'a nwta_qr::TaskCatalog,
    target: &TargetArgs,
) -> Result<Generator<'a>> {
    let output_dir = target
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    Ok(Generator::new(catalog, config.renderer()?, output_dir))
}

fn report(
    sinks: &OutputSinks,
    generator: &Generator<'_>,
    generated: &Generated,
    preview: bool,
) -> Result<()> {
    sinks.emit(&render_generated(generated))?;

    if preview && !sinks.json {
        let symbol = generator.renderer().encoder().render_terminal(&generated.wire)?;
        println!();
        println!("{symbol}");
    }
    Ok(())
}
