//! Human readable rendering of execution trace forests.
//!
//! [`render_forest`] prints one line per trace entry, nesting entries under the
//! call that produced them. Names come from a [`Metadata`] view; whatever it
//! does not know about is printed raw or with a placeholder, so rendering
//! itself never fails.

pub mod metadata;
pub mod painter;
mod serde_utils;
pub mod trace;

use std::slice;

use dapptrace_abi::{
    AbiType, decode, decode_calldata,
    format::format_hex,
    print::{print_value, print_values},
    signature::{error_string_selector, method_name, parse_param_types},
};
use ethereum_types::{H32, H256};
use tracing::debug;

pub use metadata::{
    ContractInfo, EventField, EventInfo, Metadata, MetadataStore, MethodInfo, SourceLocation,
    SourcePosition, contract_name_part, contract_path_part,
};
pub use painter::{AnsiPainter, Painter, PlainPainter};
pub use trace::{Event, Fetch, FrameContext, Trace, TraceData, TraceTree, VmError};

const BRANCH: &str = "├─ ";
const EDGE: &str = "└─ ";
const PIPE: &str = "│  ";
const SPACE: &str = "   ";
const RETURN: &str = "← ";

pub const UNKNOWN_CALLEE: &str = "call [unknown]";
pub const UNKNOWN_CONTRACT: &str = "<unknown contract>";
pub const UNKNOWN_METHOD: &str = "[unknown method]";
pub const FALLBACK_FUNCTION: &str = "[fallback function]";

/// Renders every tree of `forest`, one line per entry.
pub fn render_forest<M>(metadata: &M, forest: &[TraceTree], painter: &dyn Painter) -> String
where
    M: Metadata + ?Sized,
{
    let mut out = String::new();
    for tree in forest {
        render_tree(metadata, painter, tree, "", "", &mut out);
    }
    out
}

fn render_tree<M>(
    metadata: &M,
    painter: &dyn Painter,
    tree: &TraceTree,
    left: &str,
    child: &str,
    out: &mut String,
) where
    M: Metadata + ?Sized,
{
    out.push_str(left);
    out.push_str(&render_trace(metadata, &tree.trace, painter));
    out.push('\n');

    let last = tree.children.len().saturating_sub(1);
    for (i, subtree) in tree.children.iter().enumerate() {
        let (branch, pipe) = if i == last { (EDGE, SPACE) } else { (BRANCH, PIPE) };
        render_tree(
            metadata,
            painter,
            subtree,
            &format!("{child}{branch}"),
            &format!("{child}{pipe}"),
            out,
        );
    }
}

/// A single entry with its source location suffix, without tree connectors.
pub fn render_trace<M>(metadata: &M, trace: &Trace, painter: &dyn Painter) -> String
where
    M: Metadata + ?Sized,
{
    let location = match metadata.source_location(trace) {
        SourceLocation::Resolved(position) => format!("({position})"),
        SourceLocation::Unresolved(placeholder) => placeholder,
    };
    format!(
        "{} {}",
        render_trace_data(metadata, &trace.data, painter),
        painter.location(&location)
    )
}

fn render_trace_data<M>(metadata: &M, data: &TraceData, painter: &dyn Painter) -> String
where
    M: Metadata + ?Sized,
{
    match data {
        TraceData::Entry(label) => label.clone(),
        TraceData::Event(event) => painter.event(&render_event(metadata, event)),
        TraceData::Query(Fetch::Contract { address }) => {
            format!("fetch contract {}", format_hex(address.as_bytes()))
        }
        TraceData::Query(Fetch::Slot { address, slot }) => format!(
            "fetch storage slot {slot:#x} from {}",
            format_hex(address.as_bytes())
        ),
        TraceData::Error(error) => format!("{} {}", painter.error("error"), render_error(error)),
        TraceData::Return { output, context } => {
            format!("{RETURN}{}", render_return(metadata, output, context))
        }
        TraceData::Frame(context) => painter.call(&render_frame(metadata, context)),
    }
}

fn render_event<M>(metadata: &M, event: &Event) -> String
where
    M: Metadata + ?Sized,
{
    if let Some(info) = event
        .topics
        .first()
        .and_then(|topic| metadata.event_by_topic(topic))
    {
        // Indexed fields live in the topics and are not shown.
        match decode(&info.non_indexed_types(), &event.data) {
            Ok(values) => return format!("{}{}", info.name, print_values(&values)),
            Err(err) => debug!(event = %info.name, %err, "Could not decode event data"),
        }
    }
    let args: Vec<String> = std::iter::once(format_hex(&event.data))
        .chain(event.topics.iter().map(|topic| format_hex(topic.as_bytes())))
        .collect();
    format!("log{}({})", event.topics.len(), args.join(", "))
}

fn render_error(error: &VmError) -> String {
    match error {
        VmError::Revert(payload) => {
            if payload.starts_with(&error_string_selector()) {
                match decode_calldata(&[AbiType::String], payload) {
                    Ok(reason) => return format!("{error}{}", print_values(&reason)),
                    Err(err) => debug!(%err, "Could not decode revert reason"),
                }
            }
            format!("{error} {}", format_hex(payload))
        }
        other => other.to_string(),
    }
}

fn render_return<M>(metadata: &M, output: &[u8], context: &FrameContext) -> String
where
    M: Metadata + ?Sized,
{
    match context {
        FrameContext::Create { .. } => format!("{} bytes of code", output.len()),
        FrameContext::Call {
            code_hash,
            selector,
            ..
        } => selector
            .and_then(|selector| render_return_value(metadata, code_hash, &selector, output))
            .unwrap_or_else(|| format_hex(output)),
    }
}

fn render_return_value<M>(
    metadata: &M,
    code_hash: &H256,
    selector: &H32,
    output: &[u8],
) -> Option<String>
where
    M: Metadata + ?Sized,
{
    let output_type = metadata
        .contract_by_hash(code_hash)?
        .method_output_type(selector)?;
    match decode(slice::from_ref(output_type), output) {
        Ok(values) => {
            let value = values.first()?;
            Some(format!("{output_type} {}", print_value(value)))
        }
        Err(err) => {
            debug!(%output_type, %err, "Could not decode return data");
            None
        }
    }
}

fn render_frame<M>(metadata: &M, context: &FrameContext) -> String
where
    M: Metadata + ?Sized,
{
    match context {
        FrameContext::Create { code_hash, .. } => {
            let name = metadata
                .contract_by_hash(code_hash)
                .map_or(UNKNOWN_CONTRACT, ContractInfo::display_name);
            format!("create {name}")
        }
        FrameContext::Call {
            code_hash,
            selector,
            calldata,
            ..
        } => {
            let Some(contract) = metadata.contract_by_hash(code_hash) else {
                return UNKNOWN_CALLEE.to_owned();
            };
            let signature = selector
                .as_ref()
                .and_then(|selector| contract.method_signature(selector));
            let method = match (selector, signature) {
                (None, _) => FALLBACK_FUNCTION,
                (Some(_), None) => UNKNOWN_METHOD,
                (Some(_), Some(signature)) => method_name(signature),
            };
            let args = signature
                .and_then(|signature| render_call_args(signature, calldata))
                .unwrap_or_else(|| format!("({})", format_hex(calldata)));
            format!("call {}::{method}{args}", contract.display_name())
        }
    }
}

fn render_call_args(signature: &str, calldata: &[u8]) -> Option<String> {
    let types = parse_param_types(signature)
        .inspect_err(|err| debug!(signature, %err, "Could not parse method signature"))
        .ok()?;
    let values = decode_calldata(&types, calldata)
        .inspect_err(|err| debug!(signature, %err, "Could not decode calldata"))
        .ok()?;
    Some(print_values(&values))
}
