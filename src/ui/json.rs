use std::io::Write;

use serde::Serialize;

use crate::utils::IntoDiagnosticShorthand;

pub fn json_print(mut out: impl Write, value: &impl Serialize) -> miette::Result<()> {
    serde_json::to_writer_pretty(&mut out, value).d()?;
    out.write_all(b"\n").d()?;
    Ok(())
}
