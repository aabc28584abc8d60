use crate::commands::{CmdMessage, CmdResult};
use crate::config::LibrisConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = LibrisConfig::load(config_dir)?;

    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            Ok(CmdResult::default().with_message(CmdMessage::info(format!("{} = {}", key, value))))
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, value.trim())))
                .with_config(config))
        }
    }
}
