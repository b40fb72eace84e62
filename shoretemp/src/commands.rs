// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use telegram::BotCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Start,
  Help,
  Temp,
}

#[derive(Debug)]
pub struct CommandInfo {
  pub name: &'static str,
  pub description: &'static str,
  pub command: Command,
  /// Listed in the bot's `/` menu.
  pub in_menu: bool,
}

pub const COMMANDS: &[CommandInfo] = &[
  CommandInfo {
    name: "start",
    description: "Show the welcome message",
    command: Command::Start,
    in_menu: false,
  },
  CommandInfo {
    name: "temp",
    description: "Get current water temperature",
    command: Command::Temp,
    in_menu: true,
  },
  CommandInfo {
    name: "help",
    description: "Show available commands",
    command: Command::Help,
    in_menu: true,
  },
];

pub fn lookup(name: &str) -> Option<Command> {
  COMMANDS
    .iter()
    .find(|info| info.name.eq_ignore_ascii_case(name))
    .map(|info| info.command)
}

/// Parses `/cmd`, `/cmd@BotName` and `/cmd args`. Plain text and unknown commands give `None`.
pub fn parse(text: &str) -> Option<Command> {
  let word = text.split_whitespace().next()?;
  let name = word.strip_prefix('/')?;
  let name = name.split('@').next().unwrap_or(name);
  lookup(name)
}

pub fn menu() -> Vec<BotCommand> {
  COMMANDS
    .iter()
    .filter(|info| info.in_menu)
    .map(|info| BotCommand::new(info.name, info.description))
    .collect()
}
