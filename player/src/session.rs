//! Interactive game session
//!
//! A [`Session`] owns one game handle together with the size tag it was
//! created with, and every engine call goes through the size-erased dispatch
//! functions using that pair.

use std::io::{BufRead, Write};

use anyhow::Result;
use engine_core::{EngineError, Game};
use engine_games::{
    create_game, create_game_seeded, delete_game, get_score, is_game_over, is_valid_game_size,
    render_game, reset_game, supported_sizes, swipe, DispatchError, GameHandle, SizeTag,
};
use games_2048::{Game2048, Grid, Tablebase};
use once_cell::unsync::OnceCell;
use tracing::{debug, info, warn};

use crate::command::{Command, HELP};
use crate::config::Config;

const BANNER: &str = "Slide 2048. Swipe with w/a/s/d, n restarts, n <size> changes board, q quits.";

/// Upper bound on positions enumerated for the 2x2 tablebase
const TABLEBASE_LIMIT: usize = 10_000;

/// Whether the input loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    size: SizeTag,
    game: GameHandle,
    four_chance: f64,
    seed: Option<u64>,
    // Built the first time a 2x2 board is shown.
    tablebase: OnceCell<Tablebase<2>>,
}

impl Session {
    pub fn new(size: SizeTag, four_chance: f64, seed: Option<u64>) -> Result<Self> {
        let game = Self::create(size, four_chance, seed)?;
        info!(size, four_chance, ?seed, "Game created");
        Ok(Self {
            size,
            game,
            four_chance,
            seed,
            tablebase: OnceCell::new(),
        })
    }

    fn create(
        size: SizeTag,
        four_chance: f64,
        seed: Option<u64>,
    ) -> Result<GameHandle, DispatchError> {
        match seed {
            Some(seed) => create_game_seeded(size, four_chance, seed),
            None => create_game(size, four_chance),
        }
    }

    pub fn size(&self) -> SizeTag {
        self.size
    }

    pub fn score(&self) -> Result<u64> {
        Ok(get_score(self.size, &self.game)?)
    }

    pub fn is_over(&self) -> Result<bool> {
        Ok(is_game_over(self.size, &self.game)?)
    }

    /// Write the score and board to `out`
    ///
    /// A 2x2 game still in play also gets its win chance and best move.
    pub fn print(&self, out: &mut impl Write) -> Result<()> {
        let board = render_game(self.size, &self.game)?;
        write!(out, "{}", board)?;
        if let Some(game) = self.game.downcast_ref::<Game2048<2>>() {
            if !game.is_game_over() {
                self.print_analysis(game.grid(), out)?;
            }
        }
        Ok(())
    }

    fn tablebase(&self) -> Result<&Tablebase<2>> {
        let tablebase = self
            .tablebase
            .get_or_try_init(|| Tablebase::build(self.four_chance as f32, TABLEBASE_LIMIT))?;
        Ok(tablebase)
    }

    fn print_analysis(&self, grid: &Grid<2>, out: &mut impl Write) -> Result<()> {
        let tablebase = self.tablebase()?;
        match tablebase.query(grid) {
            Some(chance) => write!(out, "Win chance: {:.4}", chance)?,
            None => write!(out, "Win chance: unknown")?,
        }
        match tablebase.best_move(grid) {
            Some(dir) => writeln!(out, " Best move: {}", dir)?,
            None => writeln!(out, " Best move: UNKNOWN")?,
        }
        Ok(())
    }

    /// Run one command, writing any feedback to `out`
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Move(dir) => {
                let (dir_row, dir_col) = dir.delta();
                match swipe(self.size, &mut self.game, dir_row, dir_col) {
                    Ok(gained) => debug!(direction = %dir, gained, "Swiped"),
                    Err(DispatchError::Engine(EngineError::GameOver)) => {
                        writeln!(out, "The game is over. Type n to play again or q to quit.")?;
                        return Ok(Flow::Continue);
                    }
                    Err(e) => return Err(e.into()),
                }
                self.print(out)?;
                if self.is_over()? {
                    let score = self.score()?;
                    info!(size = self.size, score, "Game over");
                    writeln!(out, "GAME OVER! Final score: {}", score)?;
                }
            }
            Command::Reset => {
                reset_game(self.size, &mut self.game)?;
                debug!(size = self.size, "Game reset");
                self.print(out)?;
            }
            Command::NewGame(size) => {
                if !is_valid_game_size(size) {
                    warn!(size, "Rejected new game with unsupported size");
                    writeln!(
                        out,
                        "Bad size {}: expected one of {}",
                        size,
                        supported_sizes()
                    )?;
                    return Ok(Flow::Continue);
                }
                let game = Self::create(size, self.four_chance, self.seed)?;
                let old_game = std::mem::replace(&mut self.game, game);
                let old_size = std::mem::replace(&mut self.size, size);
                delete_game(old_size, old_game).map_err(|rejected| rejected.error)?;
                info!(from = old_size, to = size, "Board size changed");
                self.print(out)?;
            }
            Command::Sizes => writeln!(out, "Playable sizes: {}", supported_sizes())?,
            Command::Help => write!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Release the game and return its final score
    pub fn finish(self) -> Result<u64> {
        let score = self.score()?;
        delete_game(self.size, self.game).map_err(|rejected| rejected.error)?;
        Ok(score)
    }
}

/// Play one session reading commands from `input` until `q` or end of input
///
/// Returns the score of the game that was active when the session ended.
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, mut out: W) -> Result<u64> {
    let mut session = Session::new(config.size, config.four_chance, config.seed())?;
    writeln!(out, "{}", BANNER)?;
    session.print(&mut out)?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                writeln!(
                    out,
                    "Unrecognized command '{}', type ? for help",
                    line.trim()
                )?;
            }
            continue;
        };
        debug!(%command, "Command received");
        if session.execute(command, &mut out)? == Flow::Quit {
            break;
        }
    }

    out.flush()?;
    session.finish()
}
