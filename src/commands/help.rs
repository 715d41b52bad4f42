use crate::{libs::messages::Message, msg_print};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    msg_print!(Message::HelpText, true);
    Ok(())
}
