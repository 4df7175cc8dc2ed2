//! Lights Out entry point
//!
//! Native: plays one board over stdin/stdout. Each line is `row col`;
//! `q` quits. Pass a settings JSON path as the first argument.
//! Web: the page drives the library through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::io::{BufRead, Write};
    use std::path::PathBuf;

    use lights_out::platform::entropy_seed;
    use lights_out::{GameEvent, GameState, Settings};

    env_logger::init();

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_file(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    let seed = entropy_seed();
    let mut state = GameState::new(settings, seed)?;
    log::info!("Lights Out (native) starting with seed: {}", seed);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", state.grid())?;
    if state.is_won() {
        writeln!(stdout, "You won!")?;
        return Ok(());
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }

        let Some(coord) = parse_coord(line) else {
            writeln!(stdout, "expected `row col`, got {:?}", line)?;
            continue;
        };

        match state.click(coord) {
            GameEvent::Won => {
                writeln!(stdout, "{}\nYou won in {} moves!", state.grid(), state.moves())?;
                break;
            }
            GameEvent::Toggled => writeln!(stdout, "{}", state.grid())?,
            GameEvent::Ignored => writeln!(stdout, "({}, {}) is off the board", coord.row, coord.col)?,
        }
    }

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_coord(line: &str) -> Option<lights_out::Coord> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(lights_out::Coord::new(row, col))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
