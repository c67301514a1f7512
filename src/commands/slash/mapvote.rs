//! # Mapvote Command
//!
//! Starts a map vote between two team captains.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_mapvote_command()]
}

fn create_mapvote_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("mapvote")
        .description("Starts a map vote between two team captains")
        .create_option(|option| {
            option
                .name("captain1")
                .description("Team Captain 1")
                .kind(CommandOptionType::User)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("captain2")
                .description("Team Captain 2")
                .kind(CommandOptionType::User)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapvote_command_takes_two_required_users() {
        let command = create_mapvote_command();
        assert_eq!(command.0.get("name").unwrap(), "mapvote");

        let options = command.0.get("options").unwrap().as_array().unwrap();
        assert_eq!(options.len(), 2);
        for (option, expected) in options.iter().zip(["captain1", "captain2"]) {
            assert_eq!(option["name"], serde_json::json!(expected));
            // CommandOptionType::User = 6 on the wire.
            assert_eq!(option["type"], serde_json::json!(6));
            assert_eq!(option["required"], serde_json::json!(true));
        }
    }
}
