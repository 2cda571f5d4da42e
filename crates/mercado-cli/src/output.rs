use std::io::{self, Write};

use crate::envelope::Envelope;
use crate::error::CliError;

pub fn render(envelope: &Envelope, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(envelope)?
    } else {
        serde_json::to_string(envelope)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{payload}")?;
    Ok(())
}
