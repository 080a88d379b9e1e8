//! Line-oriented interactive session: the terminal equivalent of keeping the
//! app open in one browser tab.

use std::fmt::Write as _;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::views::{AppContext, Notification, Route, Screen, ViewOutcome};

pub const HELP: &str = "\
Commands:
  go <path>          open a screen (/, /recipe/<id>, /favorites, /preferences)
  generate <prompt>  generate a recipe (catalog screen)
  example <n>        generate from example prompt n (catalog screen)
  fav                toggle favorite (recipe screen)
  dietary <option>   toggle a dietary option (preferences screen)
  health <option>    toggle a health option (preferences screen)
  save               save preferences (preferences screen)
  show               redraw the current screen
  help               this text
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Go(String),
    Generate(String),
    Example(usize),
    ToggleFavorite,
    ToggleDietary(String),
    ToggleHealth(String),
    Save,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "go" | "open" if !rest.is_empty() => ShellCommand::Go(rest.to_string()),
        "home" => ShellCommand::Go("/".to_string()),
        "favorites" => ShellCommand::Go("/favorites".to_string()),
        "preferences" => ShellCommand::Go("/preferences".to_string()),
        // An empty prompt is passed through so the screen can reject it.
        "generate" | "gen" => ShellCommand::Generate(rest.to_string()),
        "example" => {
            let n: usize = rest
                .parse()
                .map_err(|_| format!("'{}' is not an example number", rest))?;
            if n == 0 {
                return Err("examples are numbered from 1".to_string());
            }
            ShellCommand::Example(n - 1)
        }
        "fav" | "favorite" => ShellCommand::ToggleFavorite,
        "dietary" if !rest.is_empty() => ShellCommand::ToggleDietary(rest.to_string()),
        "health" if !rest.is_empty() => ShellCommand::ToggleHealth(rest.to_string()),
        "save" => ShellCommand::Save,
        "show" | "" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(command)
}

pub struct Session {
    ctx: AppContext,
    screen: Screen,
}

impl Session {
    pub async fn start(ctx: AppContext, route: Route) -> (Self, Vec<Notification>) {
        let (screen, notifications) = ctx.open(route).await;
        (Self { ctx, screen }, notifications)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Runs one command and returns the text to show, or `None` on quit.
    pub async fn execute(&mut self, command: ShellCommand) -> Option<String> {
        debug!(?command, route = %self.screen.route(), "shell command");
        let outcome = match command {
            ShellCommand::Quit => return None,
            ShellCommand::Help => return Some(HELP.to_string()),
            ShellCommand::Show => ViewOutcome::none(),
            ShellCommand::Go(path) => ViewOutcome::none().redirect_to(Route::resolve(&path)),
            ShellCommand::Generate(prompt) => match &mut self.screen {
                Screen::Catalog(view) => {
                    view.set_prompt(prompt);
                    view.generate(&self.ctx).await
                }
                _ => return Some(wrong_screen("generate", "/")),
            },
            ShellCommand::Example(index) => match &mut self.screen {
                Screen::Catalog(view) => {
                    if view.use_example(index) {
                        view.generate(&self.ctx).await
                    } else {
                        ViewOutcome::notify(Notification::error(format!(
                            "There is no example {}",
                            index + 1
                        )))
                    }
                }
                _ => return Some(wrong_screen("example", "/")),
            },
            ShellCommand::ToggleFavorite => match &mut self.screen {
                Screen::Detail(view) => view.toggle_favorite(&self.ctx).await,
                _ => return Some(wrong_screen("fav", "/recipe/<id>")),
            },
            ShellCommand::ToggleDietary(option) => match &mut self.screen {
                Screen::Preferences(view) => view.toggle_dietary(&option),
                _ => return Some(wrong_screen("dietary", "/preferences")),
            },
            ShellCommand::ToggleHealth(option) => match &mut self.screen {
                Screen::Preferences(view) => view.toggle_health(&option),
                _ => return Some(wrong_screen("health", "/preferences")),
            },
            ShellCommand::Save => match &self.screen {
                Screen::Preferences(view) => view.save(&self.ctx),
                _ => return Some(wrong_screen("save", "/preferences")),
            },
        };

        let mut notifications = outcome.notifications;
        if let Some(route) = outcome.redirect {
            let (screen, more) = self.ctx.open(route).await;
            self.screen = screen;
            notifications.extend(more);
        }
        Some(render(&self.screen, &notifications))
    }
}

fn wrong_screen(command: &str, path: &str) -> String {
    format!("'{}' is only available on {} (use 'go {}')", command, path, path)
}

pub fn render(screen: &Screen, notifications: &[Notification]) -> String {
    let mut out = String::new();
    for notification in notifications {
        let _ = writeln!(out, "{}", notification);
    }
    let _ = write!(out, "{}", screen);
    out
}

/// Reads commands until EOF or `quit`.
pub async fn run<R, W>(ctx: AppContext, route: Route, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut session, notifications) = Session::start(ctx, route).await;
    output
        .write_all(render(session.screen(), &notifications).as_bytes())
        .await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"\ndishcovery> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = match parse_command(&line) {
            Ok(command) => match session.execute(command).await {
                Some(text) => text,
                None => break,
            },
            Err(message) => message,
        };
        output.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            output.write_all(b"\n").await?;
        }
    }
    output.flush().await
}
