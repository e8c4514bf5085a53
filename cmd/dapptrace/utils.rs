use std::{fs::File, io::BufReader, path::Path};

use dapptrace_abi::{decode, decode_calldata, print_values, signature::parse_param_types};
use dapptrace_render::{MetadataStore, TraceTree};
use eyre::WrapErr;

pub fn load_forest(path: &Path) -> eyre::Result<Vec<TraceTree>> {
    let file = File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Failed to parse trace forest from {}", path.display()))
}

pub fn load_metadata(path: &Path) -> eyre::Result<MetadataStore> {
    let file = File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Failed to parse metadata from {}", path.display()))
}

/// Decodes hex `data` against a comma separated type list and prints the values.
pub fn decode_hex_values(types: &str, data: &str, calldata: bool) -> eyre::Result<String> {
    let types = parse_param_types(&format!("({types})"))?;
    let data = data.trim();
    let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))
        .wrap_err("Data is not valid hex")?;
    let values = if calldata {
        decode_calldata(&types, &bytes)?
    } else {
        decode(&types, &bytes)?
    };
    Ok(print_values(&values))
}
