// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{Duration, Instant};

/// Empty working directory, so no `.env` is picked up.
fn workdir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("shoretemp-{}-{}", name, std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  dir
}

fn run(bin: &str, args: &[&str], env: &[(&str, &str)], name: &str) -> Output {
  Command::new(bin)
    .args(args)
    .env_clear()
    .envs(env.iter().copied())
    .current_dir(workdir(name))
    .output()
    .unwrap()
}

#[test]
fn bot_refuses_to_start_without_token() {
  let started = Instant::now();
  let output = run(env!("CARGO_BIN_EXE_shore-bot"), &[], &[], "bot-no-token");

  assert_eq!(output.status.code(), Some(1));
  assert!(started.elapsed() < Duration::from_secs(10));

  let logs = String::from_utf8_lossy(&output.stdout);
  assert!(logs.contains("TELEGRAM_BOT_TOKEN is not set"), "{logs}");
}

#[test]
fn blank_token_counts_as_missing() {
  let output = run(
    env!("CARGO_BIN_EXE_shore-bot"),
    &[],
    &[("TELEGRAM_BOT_TOKEN", "   ")],
    "bot-blank-token",
  );

  assert_eq!(output.status.code(), Some(1));
}

#[test]
fn get_chat_id_without_token_exits_with_failure() {
  let output = run(
    env!("CARGO_BIN_EXE_check-shore-temp"),
    &["--get-chat-id"],
    &[],
    "chat-id-no-token",
  );

  assert_eq!(output.status.code(), Some(1));
  assert!(!String::from_utf8_lossy(&output.stdout).contains("Chat ID:"));
}
