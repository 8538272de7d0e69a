//! # CLI Module / 命令行模块
//!
//! Builds the command-line interface (with localized help texts), sets up
//! logging and dispatches to the individual commands.
//!
//! 构建命令行接口（带有本地化帮助文本），设置日志并分派到各个命令。

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

use commands::SourceArgs;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

fn build_cli(locale: &str) -> Command {
    Command::new("catalog-viewer")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.config", locale = locale).to_string())
                .value_name("CONFIG")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli.verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .help(t!("cli.file", locale = locale).to_string())
                .value_name("FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with_all(["remote", "dir"])
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("remote")
                .long("remote")
                .help(t!("cli.remote", locale = locale).to_string())
                .value_name("URL")
                .global(true)
                .num_args(0..=1)
                .default_missing_value("")
                .conflicts_with("dir")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .help(t!("cli.dir", locale = locale).to_string())
                .value_name("DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("tree")
                .about(t!("cmd.tree_about", locale = locale).to_string())
                .arg(query_arg(locale)),
        )
        .subcommand(
            Command::new("show")
                .about(t!("cmd.show_about", locale = locale).to_string())
                .arg(
                    Arg::new("token")
                        .help(t!("arg.token", locale = locale).to_string())
                        .value_name("TOKEN")
                        .required(true)
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("play")
                .about(t!("cmd.play_about", locale = locale).to_string())
                .arg(
                    Arg::new("tokens")
                        .help(t!("arg.tokens", locale = locale).to_string())
                        .value_name("TOKENS")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .help(t!("arg.interval_ms", locale = locale).to_string())
                        .value_name("MILLIS")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help(t!("arg.start", locale = locale).to_string())
                        .value_name("INDEX")
                        .default_value("0")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("export")
                .about(t!("cmd.export_about", locale = locale).to_string())
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .help(t!("arg.out", locale = locale).to_string())
                        .value_name("FILE")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(query_arg(locale)),
        )
        .subcommand(
            Command::new("width")
                .about(t!("cmd.width_about", locale = locale).to_string())
                .arg(
                    Arg::new("set")
                        .long("set")
                        .help(t!("arg.width_set", locale = locale).to_string())
                        .value_name("PX")
                        .value_parser(clap::value_parser!(i64))
                        .conflicts_with_all(["nudge", "drag"])
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("nudge")
                        .long("nudge")
                        .help(t!("arg.width_nudge", locale = locale).to_string())
                        .value_name("DIRECTION")
                        .value_parser(["left", "right"])
                        .conflicts_with("drag")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("shift")
                        .long("shift")
                        .help(t!("arg.width_shift", locale = locale).to_string())
                        .requires("nudge")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("drag")
                        .long("drag")
                        .help(t!("arg.width_drag", locale = locale).to_string())
                        .value_names(["START_X", "X"])
                        .num_args(2)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd.init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg.non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn query_arg(locale: &str) -> Arg {
    Arg::new("query")
        .short('q')
        .long("query")
        .help(t!("arg.query", locale = locale).to_string())
        .value_name("QUERY")
        .default_value("")
        .action(ArgAction::Set)
}

/// Installs the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn source_args(matches: &ArgMatches) -> SourceArgs {
    SourceArgs {
        file: matches.get_one::<PathBuf>("file").cloned(),
        remote: matches.get_one::<String>("remote").cloned(),
        dir: matches.get_one::<PathBuf>("dir").cloned(),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let requested = pre_parse_language();
    let mut locale = crate::init(requested.as_deref());

    let matches = build_cli(&locale).get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config_path = matches.get_one::<PathBuf>("config").cloned();

    if let Some(("init", init_matches)) = matches.subcommand() {
        let non_interactive = init_matches.get_flag("non-interactive");
        return commands::init::execute(config_path, non_interactive, &locale);
    }

    let config = crate::infra::config::load(config_path.as_deref(), &locale)?;
    // The config language only applies when --lang was not given.
    if requested.is_none() {
        locale = crate::init(Some(&config.language));
    }

    let sources = source_args(&matches);

    match matches.subcommand() {
        Some(("tree", sub)) => {
            let query = sub.get_one::<String>("query").cloned().unwrap_or_default();
            commands::tree::execute(&config, &sources, &query, &locale).await?;
        }
        Some(("show", sub)) => {
            let token = sub
                .get_one::<String>("token")
                .cloned()
                .unwrap_or_default(); // Required by clap
            commands::show::execute(&config, &sources, &token, &locale).await?;
        }
        Some(("play", sub)) => {
            let tokens: Vec<String> = sub
                .get_many::<String>("tokens")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let interval_ms = sub.get_one::<u64>("interval-ms").copied();
            let start = sub.get_one::<usize>("start").copied().unwrap_or(0);
            commands::play::execute(&config, &sources, &tokens, interval_ms, start, &locale).await?;
        }
        Some(("export", sub)) => {
            let out = sub
                .get_one::<PathBuf>("out")
                .cloned()
                .unwrap_or_default(); // Required by clap
            let query = sub.get_one::<String>("query").cloned().unwrap_or_default();
            commands::export::execute(&config, &sources, &out, &query, &locale).await?;
        }
        Some(("width", sub)) => {
            let action = if let Some(px) = sub.get_one::<i64>("set") {
                commands::width::WidthAction::Set(*px)
            } else if let Some(direction) = sub.get_one::<String>("nudge") {
                commands::width::WidthAction::Nudge {
                    right: direction == "right",
                    shift: sub.get_flag("shift"),
                }
            } else if let Some(mut values) = sub.get_many::<i64>("drag") {
                let start_x = values.next().copied().unwrap_or(0);
                let x = values.next().copied().unwrap_or(start_x);
                commands::width::WidthAction::Drag { start_x, x }
            } else {
                commands::width::WidthAction::Show
            };
            commands::width::execute(&config, action, &locale)?;
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
        }
    }
    Ok(())
}
