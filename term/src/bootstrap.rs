use std::io::{BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use mineterm_core::{Difficulty, GameConfig};

use crate::error::AppError;

/// Seed derived from the wall clock, different on every run.
pub(crate) fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        // the low bits are enough to vary between runs
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(line.trim().to_string())
}

fn read_number<R: BufRead>(input: &mut R, what: &'static str) -> Result<i64, AppError> {
    let value = read_line(input)?;
    value
        .parse()
        .map_err(|_| AppError::Prompt { what, value })
}

/// Asks for a preset or a custom grid size and mine count.
pub(crate) fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<GameConfig, AppError> {
    writeln!(output, "Choose difficulty:")?;
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let GameConfig { size, mines } = difficulty.config();
        writeln!(
            output,
            "  {}) {:<12} {size}x{size}, {mines} mines",
            i + 1,
            difficulty.name()
        )?;
    }
    writeln!(output, "  {}) Custom", Difficulty::ALL.len() + 1)?;
    write!(output, "> ")?;
    output.flush()?;

    let choice = read_line(input)?;
    let preset = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .map(|i| Difficulty::ALL.get(i).copied().ok_or(i));

    match preset {
        Some(Ok(difficulty)) => Ok(difficulty.config()),
        Some(Err(i)) if i == Difficulty::ALL.len() => prompt_custom(input, output),
        _ if choice.eq_ignore_ascii_case("custom") || choice.eq_ignore_ascii_case("c") => {
            prompt_custom(input, output)
        }
        _ => Err(AppError::Prompt {
            what: "difficulty",
            value: choice,
        }),
    }
}

fn prompt_custom<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<GameConfig, AppError> {
    write!(output, "Enter grid size (n): ")?;
    output.flush()?;
    let size = read_number(input, "grid size")?;
    // fail before asking for mines, any size that fits one safe cell is valid
    GameConfig::from_raw(size, 0)?;

    write!(output, "Enter number of mines (less than {}): ", size * size)?;
    output.flush()?;
    let mines = read_number(input, "number of mines")?;

    Ok(GameConfig::from_raw(size, mines)?)
}
