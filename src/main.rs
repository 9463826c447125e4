//! Matrix Drill entry point
//!
//! Plays rounds in the terminal against a `Worksheet`.
//! Usage: `matrix-drill [seed]`

#[cfg(not(target_arch = "wasm32"))]
use std::io::{self, BufRead, Write};

#[cfg(not(target_arch = "wasm32"))]
use matrix_drill::{
    Choice, GameEvent, GameIterator, GameLogic, JsonPreferences, Matrix, MemoryPreferences,
    MultiplicationTable, NewGame, Result, Settings, Side, Worksheet, consts::SETTINGS_TAG,
};

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "\
Commands:
  <n>             pick answer n
  a <r> <c> <v>   set entry (r, c) of A to v
  b <r> <c> <v>   set entry (r, c) of B to v
  d               done editing
  h               help for the highlighted entry
  n               new round
  q               quit";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Matrix Drill starting...");

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<()> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(time_seed);
    log::info!("Seed: {}", seed);

    let mut iterator = GameIterator::new(GameLogic::new(load_settings()?, seed));
    start_round(&mut iterator)?;
    println!("{}\n", USAGE);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_table(&iterator);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            ["q"] => break,
            ["h"] => match iterator.help()? {
                Some(text) => println!("{}", text),
                None => println!("Nothing left to answer"),
            },
            ["n"] => start_round(&mut iterator)?,
            ["d"] => {
                if !iterator.finish_editing()? {
                    println!("Every entry of A and B must be a number");
                }
            }
            [side @ ("a" | "b"), row, col, text] => {
                let side = if *side == "a" { Side::Left } else { Side::Right };
                match (row.parse(), col.parse()) {
                    (Ok(row), Ok(col)) => {
                        if let Err(e) = iterator.edit_entry(side, row, col, text) {
                            println!("{}", e);
                        }
                    }
                    _ => println!("{}", USAGE),
                }
            }
            [n] => match n.parse::<usize>() {
                Ok(n) if n >= 1 => match iterator.choose(n - 1) {
                    Ok(Choice::Correct) => println!("Correct"),
                    Ok(Choice::Wrong) => println!("Wrong"),
                    Ok(Choice::Unavailable) => println!("Finish editing first (d)"),
                    Err(e) => println!("{}", e),
                },
                _ => println!("{}", USAGE),
            },
            _ => println!("{}", USAGE),
        }

        for event in iterator.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => println!("Score: {}", score),
                GameEvent::TableChanged => {}
                GameEvent::RoundComplete => {
                    println!("Round complete!");
                    start_round(&mut iterator)?;
                }
            }
        }
    }

    log::info!("Final score {}", iterator.logic().score());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Settings from the config directory, falling back to defaults when
/// missing or inconsistent. A fresh install gets the defaults written out.
#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> Result<Settings> {
    let settings = match JsonPreferences::open_default(SETTINGS_TAG) {
        Some(mut prefs) => {
            if prefs.path().exists() {
                log::info!("Settings from {}", prefs.path().display());
                Settings::load(&prefs)
            } else {
                let settings = Settings::default();
                settings.save_settings_forever(&mut prefs)?;
                log::info!("Default settings written to {}", prefs.path().display());
                settings
            }
        }
        None => {
            log::warn!("No config directory, using default settings");
            Settings::load(&MemoryPreferences::new(SETTINGS_TAG))
        }
    };

    let violations = settings.data_invariant();
    if violations.is_empty() {
        return Ok(settings);
    }
    for violation in &violations {
        log::warn!("Settings: {}", violation.as_str());
    }
    Ok(Settings::default())
}

#[cfg(not(target_arch = "wasm32"))]
fn start_round(iterator: &mut GameIterator<Worksheet>) -> Result<()> {
    iterator.new_game(NewGame::default())?;
    let logic = iterator.logic();
    let sheet = Worksheet::new(
        logic.rows_left(),
        logic.columns_left(),
        logic.columns_right(),
        logic.answer_alternatives_count(),
    );
    log::debug!(
        "New round {}x{} * {}x{}",
        logic.rows_left(),
        logic.columns_left(),
        logic.columns_left(),
        logic.columns_right()
    );
    iterator.init(sheet, true)
}

#[cfg(not(target_arch = "wasm32"))]
fn print_matrix(name: &str, matrix: &dyn Matrix, highlight: Option<(usize, usize)>) {
    println!("{} =", name);
    for row in 0..matrix.rows() {
        let line: Vec<String> = (0..matrix.columns())
            .map(|col| {
                if highlight == Some((row, col)) {
                    format!("{:>6}", "[?]")
                } else {
                    format!("{:>6}", matrix.get(row, col).to_string())
                }
            })
            .collect();
        println!("  {}", line.join(""));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_table(iterator: &GameIterator<Worksheet>) {
    let Some(sheet) = iterator.logic().table() else {
        return;
    };
    let highlight = iterator.logic().highlight();

    println!();
    print_matrix("A", sheet.left(), None);
    print_matrix("B", sheet.right(), None);
    print_matrix("C", sheet.product(), highlight);

    if highlight.is_some() {
        let answers: Vec<String> = (0..sheet.answer_alternatives())
            .map(|slot| {
                let value = if sheet.is_answer_visible(slot) {
                    sheet.answers().get(0, slot).to_string()
                } else {
                    "-".to_string()
                };
                format!("{}) {}", slot + 1, value)
            })
            .collect();
        println!("Answers: {}", answers.join("   "));
    }
    println!("Score: {}", iterator.logic().score());
}
