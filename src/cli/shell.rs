//! `permascript shell`: the interactive prompt.
//!
//! Each line is reduced to its digits and interpreted as:
//!
//! | Input        | Action                                   |
//! |--------------|------------------------------------------|
//! | empty line   | clear the screen                         |
//! | no digits    | report invalid input                     |
//! | `0`          | exit                                     |
//! | `1`          | ask for a new output directory           |
//! | any other id | run `generate` for it and keep going     |
//!
//! Errors for one id are printed and the prompt continues. A single
//! [`CachedFetcher`] is kept for the whole session.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::common::{CommandContext, generate_bundle};
use super::report::render_generate;
use crate::core::{PermaError, user_friendly_error};
use crate::fetch::CachedFetcher;

/// Interactive loop generating bundles for one app id after another.
#[derive(Args, Debug)]
pub struct ShellCommand {
    /// Initial output root
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Clear,
    Exit,
    SetOutput,
    Generate(u32),
    Invalid(String),
}

impl ShellInput {
    /// Only a truly empty line clears; whitespace alone is invalid input.
    pub fn parse(line: &str) -> Self {
        if line.is_empty() {
            return Self::Clear;
        }

        let digits: String = line.chars().filter(char::is_ascii_digit).collect();
        match digits.parse::<u32>() {
            Ok(0) => Self::Exit,
            Ok(1) => Self::SetOutput,
            Ok(app_id) => Self::Generate(app_id),
            Err(_) => Self::Invalid(line.trim().to_string()),
        }
    }
}

fn prompt(text: &str) -> Result<(), PermaError> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

impl ShellCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        self.run(ctx, reader).await
    }

    /// Drive the loop from any line source; ends on `0` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(self, ctx: &CommandContext, reader: R) -> Result<()> {
        let fetcher = CachedFetcher::new(ctx.fetcher()?, ctx.global.cache_capacity);
        let steam = ctx.steam()?;
        let mut output_root = ctx.output_root(self.output.as_deref())?;
        let mut lines = reader.lines();

        loop {
            println!("{} {}", "Output directory:".bold(), output_root.display());
            prompt("Enter AppID (0 = exit, 1 = set output directory): ")?;

            let Some(line) = lines.next_line().await.map_err(PermaError::from)? else {
                break;
            };

            match ShellInput::parse(&line) {
                ShellInput::Clear => {
                    print!("\x1B[2J\x1B[1;1H");
                }
                ShellInput::Exit => break,
                ShellInput::SetOutput => {
                    prompt("New output directory: ")?;
                    match lines.next_line().await.map_err(PermaError::from)? {
                        Some(dir) if !dir.trim().is_empty() => {
                            output_root = PathBuf::from(dir.trim());
                        }
                        Some(_) => println!("Output directory unchanged"),
                        None => break,
                    }
                }
                ShellInput::Generate(app_id) => {
                    match generate_bundle(&fetcher, app_id, &steam, &output_root, &ctx.spinner())
                        .await
                    {
                        Ok(outcome) => print!("{}", render_generate(&outcome)),
                        Err(e) => user_friendly_error(e).display(),
                    }
                }
                ShellInput::Invalid(input) => {
                    user_friendly_error(
                        PermaError::InvalidAppId {
                            input,
                        }
                        .into(),
                    )
                    .display();
                }
            }
            println!();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliConfig;
    use crate::test_utils::{AppInfoBuilder, TestSteam};

    #[test]
    fn test_parse_input() {
        assert_eq!(ShellInput::parse(""), ShellInput::Clear);
        assert_eq!(ShellInput::parse("   "), ShellInput::Invalid(String::new()));
        assert_eq!(ShellInput::parse(" \t"), ShellInput::Invalid(String::new()));
        assert_eq!(ShellInput::parse("0"), ShellInput::Exit);
        assert_eq!(ShellInput::parse(" 1 "), ShellInput::SetOutput);
        assert_eq!(ShellInput::parse(" 0 "), ShellInput::Exit);
        assert_eq!(ShellInput::parse("730"), ShellInput::Generate(730));
        assert_eq!(ShellInput::parse("app 7-3-0!"), ShellInput::Generate(730));
        assert_eq!(ShellInput::parse("abc"), ShellInput::Invalid("abc".to_string()));
        assert_eq!(
            ShellInput::parse("99999999999"),
            ShellInput::Invalid("99999999999".to_string())
        );
    }

    /// Line source whose reads always fail.
    struct BrokenInput;

    impl tokio::io::AsyncRead for BrokenInput {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::other("stdin closed")))
        }
    }

    #[tokio::test]
    async fn test_read_failure_is_io_error() {
        let steam = TestSteam::new().unwrap();
        let ctx = CommandContext::load(&CliConfig {
            config_path: Some(steam.root().join("absent.toml")),
            steam_path: Some(steam.steam_path()),
            appinfo_dir: Some(steam.appinfo_dir()),
            no_progress: true,
            ..CliConfig::default()
        })
        .await
        .unwrap();

        let cmd = ShellCommand {
            output: Some(steam.output_dir()),
        };
        let err = cmd.run(&ctx, BufReader::new(BrokenInput)).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<PermaError>(), Some(PermaError::IoError(_))));
        assert!(err.to_string().contains("stdin closed"));
    }

    #[tokio::test]
    async fn test_whitespace_line_does_not_stop_session() {
        let mut steam = TestSteam::new().unwrap();
        steam.add_appinfo(10, &AppInfoBuilder::new(10).depot(11, 100, 1).build()).unwrap();
        steam.add_key("11", "aa").unwrap();

        let ctx = CommandContext::load(&CliConfig {
            config_path: Some(steam.root().join("absent.toml")),
            steam_path: Some(steam.steam_path()),
            appinfo_dir: Some(steam.appinfo_dir()),
            no_progress: true,
            ..CliConfig::default()
        })
        .await
        .unwrap();

        let cmd = ShellCommand {
            output: Some(steam.output_dir()),
        };
        cmd.run(&ctx, "   \n\n10\n0\n".as_bytes()).await.unwrap();

        assert!(steam.output_dir().join("10").join("10.lua").exists());
    }

    #[tokio::test]
    async fn test_session_generates_and_exits() {
        let mut steam = TestSteam::new().unwrap();
        steam.add_appinfo(10, &AppInfoBuilder::new(10).depot(11, 100, 1).build()).unwrap();
        steam.add_key("11", "aa").unwrap();
        steam.add_manifest("11", 100, b"m").unwrap();

        let ctx = CommandContext::load(&CliConfig {
            config_path: Some(steam.root().join("absent.toml")),
            steam_path: Some(steam.steam_path()),
            appinfo_dir: Some(steam.appinfo_dir()),
            no_progress: true,
            ..CliConfig::default()
        })
        .await
        .unwrap();

        let other = steam.root().join("other");
        let script = format!("1\n{}\n10\n42\nxyz\n0\n10\n", other.display());
        let cmd = ShellCommand {
            output: Some(steam.output_dir()),
        };
        cmd.run(&ctx, script.as_bytes()).await.unwrap();

        assert!(other.join("10").join("10.lua").exists());
        assert!(!steam.output_dir().join("10").exists());
    }
}
