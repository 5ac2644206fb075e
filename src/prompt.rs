use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Prompt user on stdout and return their trimmed input from stdin.
pub fn prompt(message: &str) -> Result<String> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    prompt_with(&mut stdin.lock(), &mut stdout.lock(), message)
}

/// Return `value` when given, otherwise prompt for it.
pub fn value_or_prompt(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(message),
    }
}

pub fn prompt_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Unexpected end of input while reading '{}'", message.trim_end());
    }
    Ok(line.trim().to_string())
}
