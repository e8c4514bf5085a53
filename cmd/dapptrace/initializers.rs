use dapptrace_render::{AnsiPainter, Painter, PlainPainter};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::Directive};

use crate::cli::{ColorMode, Options};

pub fn init_tracing(opts: &Options) {
    let log_filter = EnvFilter::builder()
        .with_default_directive(Directive::from(opts.log_level))
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

/// Picks the painter for `--color`. `auto` leaves the decision to `colored`,
/// which checks for a terminal and the usual environment variables.
pub fn init_painter(mode: ColorMode) -> Box<dyn Painter> {
    match mode {
        ColorMode::Never => Box::new(PlainPainter),
        ColorMode::Always => {
            colored::control::set_override(true);
            Box::new(AnsiPainter)
        }
        ColorMode::Auto => Box::new(AnsiPainter),
    }
}
