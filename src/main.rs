use std::env;
use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use digit_life::camera::Camera;
use digit_life::clock::RunState;
use digit_life::config::Settings;
use digit_life::events::convert_event;
use digit_life::events::Command;
use digit_life::resize::Viewport;
use digit_life::Session;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_millis(1_000 / FRAMERATE as u64);

/// How much `+` and `-` change the speed by
const SPEED_STEP: Duration = Duration::from_millis(100);

/// Terminal rows kept for the status line
const STATUS_ROWS: u16 = 1;

struct App {
    session: Session,
    cam: Camera,

    /// The number being typed, if any
    input: Option<String>,

    /// Last error, shown in the status line until the next command
    message: Option<String>,
}

impl App {
    fn new(settings: Settings, cols: u16, rows: u16) -> Self {
        let cam = Camera::for_terminal(cols, rows.saturating_sub(STATUS_ROWS));
        let viewport = Viewport::new(cam.width(), cam.height());

        Self {
            session: Session::new(Settings { viewport, ..settings }),
            cam,
            input: None,
            message: None,
        }
    }

    /// Apply `command`. Returns `false` when the app should exit.
    fn handle(&mut self, command: Command) -> bool {
        self.message = None;

        let res = match command {
            Command::Exit => return false,
            Command::ToggleRun => {
                self.session.toggle_run();
                Ok(())
            }
            Command::Step => {
                self.session.step_once();
                Ok(())
            }
            Command::Reset => {
                self.session.reset();
                Ok(())
            }
            Command::Invert => {
                self.session.invert();
                Ok(())
            }
            Command::Faster => {
                let speed = self.session.speed().saturating_sub(SPEED_STEP);
                self.session.set_speed(speed);
                Ok(())
            }
            Command::Slower => {
                let speed = self.session.speed() + SPEED_STEP;
                self.session.set_speed(speed);
                Ok(())
            }
            Command::MoreRows => self.session.resize(self.session.grid().rows() + 1),
            Command::FewerRows => self.session.resize(self.session.grid().rows().saturating_sub(1)),
            Command::BeginNumber => {
                self.input = Some(String::new());
                Ok(())
            }
            Command::NumberChar(c) => {
                if let Some(input) = &mut self.input {
                    input.push(c);
                }
                Ok(())
            }
            Command::NumberErase => {
                if let Some(input) = &mut self.input {
                    input.pop();
                }
                Ok(())
            }
            Command::NumberSubmit => match self.input.take() {
                Some(number) => self.session.render_digits(&number),
                None => Ok(()),
            },
            Command::NumberCancel => {
                self.input = None;
                Ok(())
            }
            Command::ClearNumber => {
                self.session.clear_digits();
                Ok(())
            }
            Command::Click { column, row } => {
                // aim at the middle of the braille character
                let (x, y) = (2 * column as usize, 4 * row as usize + 1);
                self.session.click(x, y)
            }
            Command::TermResize { cols, rows } => {
                self.cam = Camera::for_terminal(cols, rows.saturating_sub(STATUS_ROWS));
                let viewport = Viewport::new(self.cam.width(), self.cam.height());
                self.session.set_viewport(viewport);
                Ok(())
            }
        };

        if let Err(e) = res {
            warn!(?command, "{e}");
            self.message = Some(e.to_string());
        }

        true
    }

    fn status(&self) -> String {
        if let Some(input) = &self.input {
            return format!("number: {input}_  (enter to show, esc to cancel)");
        }

        if let Some(message) = &self.message {
            return message.clone();
        }

        let grid = self.session.grid();
        let state = match self.session.state() {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        };

        format!(
            "gen {}  {}  {}ms  {}x{}  pop {}  {}",
            self.session.generation(),
            state,
            self.session.speed().as_millis(),
            grid.rows(),
            grid.cols(),
            grid.population(),
            self.session.rule(),
        )
    }

    fn draw(&mut self, stdout: &mut Stdout) -> io::Result<()> {
        self.cam.reset();
        self.cam.draw_grid(self.session.grid(), self.session.cell_size());
        let status = self.status();

        queue!(stdout, cursor::MoveTo(0, 0))?;

        for line in self.cam.render().lines() {
            queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(status),
        )?;

        stdout.flush()
    }
}

fn run(stdout: &mut Stdout) -> anyhow::Result<()> {
    let settings = Settings::from_env().context("Failed to read settings")?;
    let (cols, rows) = terminal::size().context("Failed to get terminal size")?;

    let mut app = App::new(settings, cols, rows);
    let origin = Instant::now();

    loop {
        let t = Instant::now();

        // Poll event for as long as FRAMETIME
        if event::poll(FRAMETIME)? {
            let typing = app.input.is_some();

            if let Some(command) = convert_event(event::read()?, typing) {
                if !app.handle(command) {
                    break;
                }
            }
        }

        app.session.frame(origin.elapsed());
        app.draw(stdout)?;

        let time_left = FRAMETIME.saturating_sub(t.elapsed());
        std::thread::sleep(time_left);
    }

    Ok(())
}

/// Logs share the terminal with the frame, so they stay off unless `RUST_LOG` asks for them.
fn log_filter(directives: Option<String>) -> EnvFilter {
    EnvFilter::new(directives.as_deref().unwrap_or("off"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut stdout);

    execute!(
        stdout,
        cursor::Show,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    info!("bye");

    res
}
