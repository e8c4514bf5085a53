use std::path::PathBuf;

use clap::{ArgAction, Parser as ClapParser, Subcommand as ClapSubcommand, ValueEnum};
use tracing::{Level, info};

use crate::{
    initializers::init_painter,
    utils::{decode_hex_values, load_forest, load_metadata},
};

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

#[allow(clippy::upper_case_acronyms)]
#[derive(ClapParser)]
#[command(name = "dapptrace", author, version = VERSION_STRING, about = "Render EVM execution traces and decode ABI data", long_about = None)]
pub struct CLI {
    #[clap(flatten)]
    pub opts: Options,
    #[command(subcommand)]
    pub command: Subcommand,
}

#[derive(ClapParser, Debug)]
pub struct Options {
    #[arg(
        long = "log.level",
        default_value_t = Level::WARN,
        value_name = "LOG_LEVEL",
        env = "DAPPTRACE_LOG_LEVEL",
        global = true
    )]
    pub log_level: Level,
    #[arg(
        long = "color",
        value_enum,
        default_value = "auto",
        value_name = "WHEN",
        env = "DAPPTRACE_COLOR",
        global = true
    )]
    pub color: ColorMode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(ClapSubcommand, Debug)]
pub enum Subcommand {
    #[command(name = "render", about = "Print a trace forest as an indented tree")]
    Render {
        #[arg(long = "trace", value_name = "TRACE_FILE", help = "JSON file holding the trace forest")]
        trace: PathBuf,
        #[arg(
            long = "metadata",
            value_name = "METADATA_FILE",
            help = "JSON file with known contracts and events"
        )]
        metadata: Option<PathBuf>,
    },
    #[command(name = "decode", about = "Decode ABI encoded data against a list of types")]
    Decode {
        #[arg(
            long = "types",
            value_name = "TYPES",
            help = "Comma separated types, e.g. `uint256,(address,bool)[]`"
        )]
        types: String,
        #[arg(
            long = "calldata",
            action = ArgAction::SetTrue,
            help = "Skip the 4-byte selector in front of the data"
        )]
        calldata: bool,
        #[arg(value_name = "HEX_DATA")]
        data: String,
    },
}

impl Subcommand {
    pub fn run(self, opts: &Options) -> eyre::Result<()> {
        match self {
            Subcommand::Render { trace, metadata } => {
                let forest = load_forest(&trace)?;
                let metadata = match metadata {
                    Some(path) => load_metadata(&path)?,
                    None => Default::default(),
                };
                info!(
                    trees = forest.len(),
                    contracts = metadata.contracts.len(),
                    events = metadata.events.len(),
                    "Rendering trace forest"
                );
                let painter = init_painter(opts.color);
                print!(
                    "{}",
                    dapptrace_render::render_forest(&metadata, &forest, painter.as_ref())
                );
            }
            Subcommand::Decode {
                types,
                calldata,
                data,
            } => {
                println!("{}", decode_hex_values(&types, &data, calldata)?);
            }
        }
        Ok(())
    }
}
