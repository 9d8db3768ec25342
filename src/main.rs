//! Line-oriented runner (default binary).
//!
//! Reads one command per line from stdin, applies it and prints the
//! resulting board. In versus mode every line starts with the player
//! (`1 hardDrop`, `2 moveLeft`). Blank lines and `#` comments are skipped;
//! `quit` stops early.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tetris_duel::core::{Board, EngineConfig, GameSnapshot, VersusConfig};
use tetris_duel::types::{GameAction, PlayerId, BUFFER_ROWS};
use tetris_duel::versus::{Arbiter, MatchStatus};

/// Drive a falling-block board from stdin
#[derive(Parser, Debug)]
#[command(name = "tetris-duel")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (engine settings, or versus settings with --versus)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Two-player HP match; prefix each command with 1 or 2
    #[arg(long)]
    versus: bool,

    /// Fixed piece seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.versus {
        let mut config = match &args.config {
            Some(path) => VersusConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => VersusConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.engine.seed = Some(seed);
        }
        run_versus(config, stdin.lock(), &mut out)
    } else {
        let mut config = match &args.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.seed = Some(seed);
        }
        run_single(config, stdin.lock(), &mut out)
    }
}

enum Line {
    Skip,
    Quit,
    Command(Option<PlayerId>, GameAction),
}

fn parse_line(line: &str, versus: bool) -> Result<Line> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Skip);
    }
    if line.eq_ignore_ascii_case("quit") {
        return Ok(Line::Quit);
    }
    let mut words = line.split_whitespace();
    let player = if versus {
        let word = words.next().unwrap_or_default();
        match PlayerId::from_str(word) {
            Some(player) => Some(player),
            None => bail!("expected player 1 or 2, got {word:?}"),
        }
    } else {
        None
    };
    let word = words.next().unwrap_or_default();
    match GameAction::from_str(word) {
        Some(action) => Ok(Line::Command(player, action)),
        None => bail!("unknown command {word:?}"),
    }
}

fn run_single(config: EngineConfig, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut board = Board::new(config);
    board.new_game();
    print_snapshot(out, "board", &board.snapshot())?;

    for line in input.lines() {
        let line = line?;
        let action = match parse_line(&line, false) {
            Ok(Line::Command(_, action)) => action,
            Ok(Line::Skip) => continue,
            Ok(Line::Quit) => break,
            Err(err) => {
                warn!(%err, "skipping line");
                continue;
            }
        };
        let outcome = board.apply(action)?;
        if let Some(lock) = &outcome.lock {
            let lines = lock.clear.lines_removed();
            if lines > 0 {
                writeln!(out, "cleared {lines} (+{})", lock.clear.points)?;
            }
            let combo = board.combo_text();
            if !combo.is_empty() {
                writeln!(out, "{combo}")?;
            }
        }
        print_snapshot(out, "board", &board.snapshot())?;
        if board.is_game_over() {
            writeln!(out, "game over, score {}", board.score())?;
        }
    }
    Ok(())
}

fn run_versus(config: VersusConfig, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut arbiter = Arbiter::new(config);
    arbiter.start_new_match();

    for line in input.lines() {
        let line = line?;
        let (player, action) = match parse_line(&line, true) {
            Ok(Line::Command(Some(player), action)) => (player, action),
            Ok(Line::Command(None, _)) | Ok(Line::Skip) => continue,
            Ok(Line::Quit) => break,
            Err(err) => {
                warn!(%err, "skipping line");
                continue;
            }
        };
        if let Some(report) = arbiter.apply(player, action)? {
            if report.damage > 0 {
                writeln!(
                    out,
                    "{} by {:?}: {} damage, opponent at {} HP",
                    report.attack_name, player, report.damage, report.defender_hp
                )?;
            }
        }
        for id in [PlayerId::One, PlayerId::Two] {
            let hp = arbiter.health(id);
            let title = format!("player {} ({}/{} HP)", id.index() + 1, hp.current(), hp.max());
            print_snapshot(out, &title, &arbiter.snapshot(id))?;
        }
        if let MatchStatus::Won(winner) = arbiter.status() {
            writeln!(out, "player {} wins", winner.index() + 1)?;
        }
    }
    Ok(())
}

fn print_snapshot(out: &mut impl Write, title: &str, snapshot: &GameSnapshot) -> Result<()> {
    writeln!(
        out,
        "== {title}: score {} level {} lines {} combo {}",
        snapshot.score, snapshot.level, snapshot.lines, snapshot.combo
    )?;

    let mut cells = snapshot.matrix.to_rows();
    if let Some(piece) = &snapshot.piece {
        for (r, c, _) in piece.shape.filled() {
            let row = piece.ghost_row + r as i32;
            let col = piece.col + c as i32;
            if let Some(cell) = cell_mut(&mut cells, row, col) {
                if *cell == 0 {
                    *cell = b'.';
                }
            }
        }
        for (r, c, value) in piece.shape.filled() {
            if let Some(cell) = cell_mut(&mut cells, piece.row + r as i32, piece.col + c as i32) {
                *cell = value;
            }
        }
    }

    for row in cells.iter().skip(BUFFER_ROWS) {
        let text: String = row
            .iter()
            .map(|&v| match v {
                0 => ' ',
                b'.' => '.',
                v => char::from_digit(u32::from(v), 10).unwrap_or('#'),
            })
            .collect();
        writeln!(out, "|{text}|")?;
    }
    Ok(())
}

fn cell_mut(cells: &mut [Vec<u8>], row: i32, col: i32) -> Option<&mut u8> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    cells.get_mut(row)?.get_mut(col)
}
