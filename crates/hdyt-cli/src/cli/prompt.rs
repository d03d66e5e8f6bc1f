//! Interactive prompts used when `hdyt get` is run without a URL.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Prints `question`, reads one line, returns it trimmed.
pub fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read answer")?;
    Ok(line.trim().to_string())
}

pub fn ask_url<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    let url = ask(input, out, "Enter the video URL: ")?;
    if url.is_empty() {
        anyhow::bail!("no URL given");
    }
    Ok(url)
}

/// Asks for the URL and the output directory; an empty directory answer means `.`.
pub fn ask_url_and_dir<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<(String, PathBuf)> {
    let url = ask_url(input, out)?;
    let dir = ask(
        input,
        out,
        "Enter the output directory (press Enter for current directory): ",
    )?;
    let dir = if dir.is_empty() { PathBuf::from(".") } else { PathBuf::from(dir) };
    Ok((url, dir))
}
