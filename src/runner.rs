//! Session orchestration: prompts, the key loop and result reporting.

use derive_new::new;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::console::Console;
use crate::leaderboard::{ResultStore, leaderboard_lines};
use crate::{
    BoardSize, GameError, GameFinished, GameInProgress, GameSetup, KeyAction, MoveOutcome,
    PlayerName,
};

/// Typed at any prompt to leave the program.
const EXIT_COMMAND: &str = "exit";

/// How a single playthrough ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The board filled up.
    Finished(GameFinished),
    /// The player abandoned the game to start another one.
    Restart,
    /// The player asked to leave.
    Quit,
}

/// Drives sessions until the player quits or input ends.
#[derive(Debug, new)]
pub struct SessionRunner<C, S> {
    console: C,
    store: S,
    rng: StdRng,
}

impl<C: Console, S: ResultStore> SessionRunner<C, S> {
    /// Returns the console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Plays sessions back to back until quit, interrupt or end of input.
    ///
    /// # Errors
    ///
    /// Returns terminal I/O failures. Interrupts and closed input end the
    /// loop with `Ok`; result store failures are shown and play continues.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<(), GameError> {
        info!("Session loop started");
        match self.session_loop().await {
            Err(GameError::Interrupted) => {
                info!("Interrupted, leaving without saving");
                Ok(())
            }
            Err(GameError::InputClosed) => {
                info!("Input closed");
                Ok(())
            }
            other => other,
        }
    }

    async fn session_loop(&mut self) -> Result<(), GameError> {
        loop {
            let Some(setup) = self.prompt_setup().await? else {
                return Ok(());
            };

            self.console
                .send("Use the arrow keys (or w/a/s/d) to move. Press 'Esc' to start a new game, 'q' to quit. Good luck!")
                .await?;

            match self.play(setup).await? {
                SessionEnd::Finished(finished) => self.report(&finished).await?,
                SessionEnd::Restart => {
                    info!("Game abandoned");
                    self.console.send("").await?;
                    self.console.send("Starting a new game...").await?;
                }
                SessionEnd::Quit => {
                    info!("Player quit");
                    return Ok(());
                }
            }
        }
    }

    /// Asks for a name and a board size, re-prompting on invalid input.
    ///
    /// Returns `None` if the player typed `exit`.
    #[instrument(skip(self))]
    pub async fn prompt_setup(&mut self) -> Result<Option<GameSetup>, GameError> {
        let Some(player) = self
            .prompt(
                "Please enter your name (1 to 4 characters): ",
                "Invalid name!",
                PlayerName::new,
            )
            .await?
        else {
            return Ok(None);
        };

        let size_prompt = format!(
            "Please enter the size of the board ('x*x', where 'x' is between {} and {}): ",
            BoardSize::MIN,
            BoardSize::MAX
        );
        let Some(size) = self.prompt(&size_prompt, "Invalid size!", BoardSize::parse).await? else {
            return Ok(None);
        };

        Ok(Some(GameSetup::new(size, player)))
    }

    async fn prompt<T>(
        &mut self,
        question: &str,
        complaint: &str,
        parse: impl Fn(&str) -> Result<T, GameError>,
    ) -> Result<Option<T>, GameError> {
        loop {
            self.console.send("").await?;
            self.console.send(question).await?;

            let answer = match self.console.read_line().await {
                Ok(answer) => answer,
                Err(err) if err.is_recoverable() => {
                    self.console.send(&format!("{} Please try again...", err)).await?;
                    continue;
                }
                Err(err) => return Err(err),
            };

            if answer.trim() == EXIT_COMMAND {
                return Ok(None);
            }

            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    debug!(error = %err, "Rejected prompt input");
                    self.console
                        .send(&format!("{} {} Please try again...", complaint, err))
                        .await?;
                }
            }
        }
    }

    /// Plays one game from setup to its end.
    #[instrument(skip(self, setup), fields(size = %setup.size(), player = %setup.player()))]
    pub async fn play(&mut self, setup: GameSetup) -> Result<SessionEnd, GameError> {
        let mut game: GameInProgress = setup.start(&mut self.rng);
        self.console.send_all(&game.board().render_lines()).await?;

        loop {
            let key = self.console.read_key().await?;
            let direction = match KeyAction::from_key(key) {
                KeyAction::Move(direction) => direction,
                KeyAction::Restart => return Ok(SessionEnd::Restart),
                KeyAction::Quit => return Ok(SessionEnd::Quit),
                KeyAction::Ignore => continue,
            };

            match game.apply_move(Some(direction), &mut self.rng) {
                MoveOutcome::Continue(next) => {
                    game = next;
                    self.console.send_all(&game.board().render_lines()).await?;
                }
                MoveOutcome::GameOver(finished) => return Ok(SessionEnd::Finished(finished)),
            }
        }
    }

    /// Shows the summary, stores the result and shows the leaderboard.
    ///
    /// The summary is written before the store is touched, so a store
    /// failure never hides the score. The failure is shown as a line.
    #[instrument(skip(self, finished), fields(score = finished.score(), moves = finished.moves()))]
    pub async fn report(&mut self, finished: &GameFinished) -> Result<(), GameError> {
        self.console.send_all(&finished.board().render_lines()).await?;
        self.console.send_all(&finished.summary_lines()).await?;

        let size = finished.board().size();
        match self.store.record_and_rank(&finished.finalize(), size) {
            Ok((stored, top)) => {
                info!(result_id = stored.id(), "Result saved");
                self.console.send_all(&leaderboard_lines(size, &top)).await
            }
            Err(err) => {
                warn!(error = %err, "Failed to save result");
                let err = GameError::from(err);
                self.console
                    .send(&format!("Could not save your result: {}", err))
                    .await
            }
        }
    }
}
