// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub const WARM_THRESHOLD_F: i32 = 50;

pub const WELCOME: &str = "Hey! I'm the Chicago Shore Temperature Bot.\n\n\
Send /temp to get the current Lake Michigan water temperature.\n\
Send /help to see all commands.";

pub const HELP: &str = "Available commands:\n\n\
/temp  — Get the current Chicago Shore water temperature\n\
/help  — Show this help message";

pub const FETCHING: &str = "Fetching temperature...";

pub const APOLOGY: &str = "Sorry, I couldn't fetch the temperature right now. \
NOAA might be down or the report isn't available. Try again later.";

pub const FALLBACK: &str = "Send /temp to get the Chicago Shore water temperature.";

pub const FETCH_FAILED: &str = "Chicago Shore: could not fetch temperature.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlook {
  Encouraging,
  Cautionary,
}

impl Outlook {
  pub fn for_temperature(temp: i32) -> Self {
    if temp > WARM_THRESHOLD_F {
      Outlook::Encouraging
    } else {
      Outlook::Cautionary
    }
  }
}

/// Reply to `/temp`.
pub fn temperature_reply(temp: Option<i32>) -> String {
  let Some(temp) = temp else {
    return APOLOGY.to_string();
  };

  match Outlook::for_temperature(temp) {
    Outlook::Encouraging => {
      format!("Chicago Shore water temp: {}°F — good time for the lake!", temp)
    }
    Outlook::Cautionary => {
      format!("Chicago Shore water temp: {}°F — bit chilly for swimming.", temp)
    }
  }
}

/// Scheduled message sent by `check-shore-temp`.
pub fn daily_report(temp: i32) -> String {
  match Outlook::for_temperature(temp) {
    Outlook::Encouraging => format!(
      "Chicago Shore water temp: {}°F — good time for the lake.",
      temp
    ),
    Outlook::Cautionary => format!("Chicago Shore water temp: {}°F", temp),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_is_exclusive() {
    assert_eq!(Outlook::for_temperature(51), Outlook::Encouraging);
    assert_eq!(Outlook::for_temperature(50), Outlook::Cautionary);
    assert_eq!(Outlook::for_temperature(-3), Outlook::Cautionary);
  }

  #[test]
  fn bot_replies() {
    assert_eq!(
      temperature_reply(Some(72)),
      "Chicago Shore water temp: 72°F — good time for the lake!"
    );
    assert_eq!(
      temperature_reply(Some(38)),
      "Chicago Shore water temp: 38°F — bit chilly for swimming."
    );
    assert_eq!(temperature_reply(None), APOLOGY);
  }

  #[test]
  fn daily_reports() {
    assert_eq!(
      daily_report(55),
      "Chicago Shore water temp: 55°F — good time for the lake."
    );
    assert_eq!(daily_report(44), "Chicago Shore water temp: 44°F");
  }

  #[test]
  fn help_lists_commands() {
    assert!(HELP.contains("/temp"));
    assert!(HELP.contains("/help"));
    assert!(WELCOME.contains("/temp"));
  }
}
