//! What the binary leaves on stdout when it exits.

use std::io::Write;

/// Write the followed link destination, if any, as a single stdout line so
/// wrappers can hand it to an opener (`xdg-open "$(showterm)"`).
pub fn print_exit_payload(destination: Option<&str>) -> std::io::Result<()> {
    write_exit_payload(&mut std::io::stdout().lock(), destination)
}

fn write_exit_payload(out: &mut impl Write, destination: Option<&str>) -> std::io::Result<()> {
    let Some(destination) = destination else {
        return Ok(());
    };
    writeln!(out, "{destination}")?;
    out.flush()
}
