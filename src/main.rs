use anyhow::Result;
use clap::Parser;
use std::io::{stdin, IsTerminal};
use taskman::{
    commands::Shell,
    db::tasks::Tasks,
    libs::{
        config::Config,
        data_storage::{APP_NAME, APP_VERSION},
        logging,
        messages::Message,
        prompt::{ScriptedPrompt, TerminalPrompt},
    },
    msg_error_anyhow, msg_info, msg_print,
};

/// Interactive task tracker. Run without arguments to start the shell.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    logging::init();

    msg_print!(Message::Banner {
        app_name: APP_NAME.to_string(),
        version: APP_VERSION.to_string(),
    });

    let config = Config::load()?;
    let tasks = Tasks::open(&config).map_err(|e| {
        tracing::error!(error = %e, "task store unavailable");
        msg_error_anyhow!(Message::StoreUnavailable(e.to_string()))
    })?;

    msg_info!(Message::StoreConnected(format!(
        "{}, database '{}', collection '{}'",
        config.store_uri, config.database_name, config.collection_name
    )));
    msg_info!(Message::TaskCount(tasks.count()?));

    if stdin().is_terminal() {
        Shell::new(tasks, config, TerminalPrompt::new()).run()
    } else {
        Shell::new(tasks, config, ScriptedPrompt::stdin()).run()
    }
}
