//! Terminal console: stdout lines, stdin lines and raw-mode key presses.

use std::io::{BufRead, Write};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use super::Console;
use crate::GameError;
use crate::shutdown::Shutdown;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// How often the key loop wakes up to check for shutdown.
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Leaves raw mode on drop, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, GameError> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to leave raw mode");
        }
    }
}

/// Line input served by a dedicated OS thread.
///
/// The thread reads one line per request, so it never consumes key presses
/// meant for the raw-mode loop. A read still blocked at exit does not hold
/// up runtime shutdown; the thread ends with the process.
struct LineReader {
    requests: std_mpsc::Sender<()>,
    lines: mpsc::UnboundedReceiver<std::io::Result<Option<String>>>,
    pending: bool,
}

impl LineReader {
    fn spawn<R: BufRead + Send + 'static>(mut reader: R) -> Result<Self, GameError> {
        let (requests, request_rx) = std_mpsc::channel::<()>();
        let (line_tx, lines) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name("twenty48-stdin".to_string())
            .spawn(move || {
                while request_rx.recv().is_ok() {
                    let mut line = String::new();
                    let read = match reader.read_line(&mut line) {
                        Ok(0) => Ok(None),
                        Ok(_) => {
                            let trimmed = line.trim_end_matches(['\r', '\n']).len();
                            line.truncate(trimmed);
                            Ok(Some(line))
                        }
                        Err(e) => Err(e),
                    };
                    let finished = !matches!(read, Ok(Some(_)));
                    if line_tx.send(read).is_err() || finished {
                        break;
                    }
                }
            })?;

        Ok(Self {
            requests,
            lines,
            pending: false,
        })
    }

    /// Next line, `None` at end of input. Cancel safe: an abandoned request
    /// is answered on the following call.
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        if !self.pending {
            if self.requests.send(()).is_err() {
                return Ok(None);
            }
            self.pending = true;
        }

        let line = self.lines.recv().await.unwrap_or(Ok(None));
        self.pending = false;
        line
    }
}

/// Console on the controlling terminal.
///
/// Line prompts are bounded by `prompt_timeout`. Both reads return
/// [`GameError::Interrupted`] once `shutdown` fires.
pub struct TerminalConsole {
    lines: LineReader,
    shutdown: Shutdown,
    prompt_timeout: Duration,
}

impl std::fmt::Debug for TerminalConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalConsole")
            .field("prompt_timeout", &self.prompt_timeout)
            .finish_non_exhaustive()
    }
}

impl TerminalConsole {
    /// Creates a console reading from stdin and writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Io`] if the input thread cannot be started.
    #[instrument(skip(shutdown))]
    pub fn new(shutdown: Shutdown, prompt_timeout: Duration) -> Result<Self, GameError> {
        info!("Creating TerminalConsole");
        Self::with_reader(std::io::BufReader::new(std::io::stdin()), shutdown, prompt_timeout)
    }

    fn with_reader<R: BufRead + Send + 'static>(
        reader: R,
        shutdown: Shutdown,
        prompt_timeout: Duration,
    ) -> Result<Self, GameError> {
        Ok(Self {
            lines: LineReader::spawn(reader)?,
            shutdown,
            prompt_timeout,
        })
    }
}

#[async_trait::async_trait]
impl Console for TerminalConsole {
    async fn send(&mut self, line: &str) -> Result<(), GameError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn read_line(&mut self) -> Result<String, GameError> {
        let mut shutdown = self.shutdown.clone();
        let timeout = self.prompt_timeout;

        tokio::select! {
            _ = shutdown.wait() => Err(GameError::Interrupted),
            read = tokio::time::timeout(timeout, self.lines.next_line()) => match read {
                Err(_) => {
                    warn!(seconds = timeout.as_secs(), "Prompt timed out");
                    Err(GameError::InputTimeout { seconds: timeout.as_secs() })
                }
                Ok(Ok(Some(line))) => {
                    debug!(len = line.len(), "Line read");
                    Ok(line)
                }
                Ok(Ok(None)) => Err(GameError::InputClosed),
                Ok(Err(e)) => Err(GameError::Io(e)),
            },
        }
    }

    #[instrument(skip(self))]
    async fn read_key(&mut self) -> Result<KeyEvent, GameError> {
        let _raw = RawModeGuard::enable()?;

        loop {
            if self.shutdown.is_triggered() {
                return Err(GameError::Interrupted);
            }

            if event::poll(KEY_POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                debug!(code = ?key.code, "Key read");
                return Ok(key);
            }

            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown;
    use std::io::{BufReader, Cursor, Read};

    /// Reader that blocks until its sender is dropped.
    struct Stalled(std_mpsc::Receiver<()>);

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    #[tokio::test]
    async fn reads_lines_then_reports_closed() {
        let (_trigger, shutdown) = shutdown::channel();
        let input = Cursor::new(b"ann\r\n4*4\n".to_vec());
        let mut console =
            TerminalConsole::with_reader(input, shutdown, Duration::from_secs(5)).unwrap();

        assert_eq!(console.read_line().await.unwrap(), "ann");
        assert_eq!(console.read_line().await.unwrap(), "4*4");
        assert!(matches!(console.read_line().await, Err(GameError::InputClosed)));
    }

    #[tokio::test]
    async fn pending_line_survives_timeout() {
        let (_trigger, shutdown) = shutdown::channel();
        let (release, stalled) = std_mpsc::channel::<()>();
        let input = BufReader::new(Stalled(stalled).chain(Cursor::new(b"bob\n".to_vec())));
        let mut console =
            TerminalConsole::with_reader(input, shutdown, Duration::from_millis(20)).unwrap();

        assert!(matches!(
            console.read_line().await,
            Err(GameError::InputTimeout { .. })
        ));
        drop(release);
        console.prompt_timeout = Duration::from_secs(5);
        assert_eq!(console.read_line().await.unwrap(), "bob");
    }

    #[test]
    fn interrupt_at_prompt_does_not_wait_for_input() {
        let (_hold, stalled) = std_mpsc::channel::<()>();
        let (done_tx, done_rx) = std_mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime.block_on(async move {
                let (trigger, shutdown) = shutdown::channel();
                let mut console = TerminalConsole::with_reader(
                    BufReader::new(Stalled(stalled)),
                    shutdown,
                    Duration::from_secs(60),
                )
                .unwrap();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    trigger.trigger();
                });
                console.read_line().await
            });
            // Dropping the runtime must not block on the stalled read.
            drop(runtime);
            let _ = done_tx.send(matches!(result, Err(GameError::Interrupted)));
        });

        let interrupted = done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("runtime shutdown waited for stdin");
        assert!(interrupted);
    }
}
