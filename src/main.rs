mod ui;

use anyhow::Error;
use std::io;
use structopt::StructOpt;
use tracing::Level;

use rmv::actuator::{Actuator, Move};
use rmv::pattern::CaseSensitivity;
use rmv::report::Trace;
use rmv::transform::Transform;

use crate::ui::Toggle;

/// Move files using regular expressions.
///
/// Files in the source directory with names that match the from-pattern are
/// moved into the destination directory with names resolved by the to-pattern.
/// The destination directory is created if it does not exist (but not its
/// parents).
#[derive(Debug, StructOpt)]
#[structopt(name = "rmv", rename_all = "kebab-case")]
struct Options {
    /// Source path.
    ///
    /// The final component is a regular expression (the from-pattern) that is
    /// matched against the start of the name of each file in the directory
    /// formed by the preceding components.
    #[structopt(value_name = "SRC")]
    source: String,
    /// Destination path.
    ///
    /// The final component is a template (the to-pattern) that replaces the
    /// matched part of each file name. Captures are referenced with `\1`,
    /// `\g<1>`, or `\g<name>`.
    #[structopt(value_name = "DEST")]
    destination: String,
    /// Confirm each move.
    #[structopt(long = "interactive", short = "a")]
    interactive: bool,
    /// Match the from-pattern without regard to case.
    #[structopt(long = "insensitive", short = "i")]
    insensitive: bool,
    /// Print resolved directories, patterns, and each move.
    #[structopt(long = "verbose", short = "v")]
    verbose: bool,
    /// Determines if and when color and style is enabled in output.
    ///
    /// One of "always", "never", or "automatic" (or its abbreviation "auto").
    #[structopt(long = "color", value_name = "when", default_value = "automatic")]
    color: Toggle,
}

fn main() -> Result<(), Error> {
    let options = Options::from_args();
    ui::toggle_color_output(options.color);
    tracing_subscriber::fmt()
        .with_max_level(if options.verbose {
            Level::DEBUG
        }
        else {
            Level::WARN
        })
        .with_writer(io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .without_time()
        .with_target(false)
        .init();

    let mut report = Trace;
    let transform = Transform::resolve(
        &options.source,
        &options.destination,
        CaseSensitivity::insensitive_if(options.insensitive),
    )?;
    let manifest = transform.read(&mut report)?;
    let mut prompt = ui::prompt(options.interactive);
    let actuation = match Actuator::new(&mut *prompt).write::<Move, _>(manifest, &mut report) {
        Ok(actuation) => actuation,
        Err(error) => {
            ui::print_failures(error.actuation().failed())?;
            return Err(error.into());
        }
    };
    if !actuation.is_complete() {
        ui::print_failures(actuation.failed())?;
        anyhow::bail!(
            "failed to move {} of {} files",
            actuation.failed().len(),
            actuation.failed().len() + actuation.moved().len(),
        );
    }
    Ok(())
}
