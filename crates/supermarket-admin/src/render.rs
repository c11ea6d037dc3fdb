//! Shared text layout for every report: fixed-width rules, banners and prompts.

use std::io::{self, BufRead, Write};

pub const WIDTH: usize = 60;

pub fn heavy_rule(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(WIDTH))
}

pub fn light_rule(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(WIDTH))
}

/// Blank line, then the title framed by heavy rules.
pub fn banner(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    heavy_rule(out)?;
    writeln!(out, "{title}")?;
    heavy_rule(out)
}

/// Print `text`, then read one trimmed line. `None` means end of input.
pub fn prompt(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    text: &str,
) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
