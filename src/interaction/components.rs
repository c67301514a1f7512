//! # Veto Components
//!
//! Builders for the category select menu and the ban buttons.

use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;

use crate::veto::CATEGORY_PICKS;

/// Custom id of the category select menu
pub const CATEGORY_MENU_ID: &str = "veto_categories";

/// Custom id prefix for ban buttons; the suffix is the candidate index
pub const BAN_BUTTON_PREFIX: &str = "veto_ban_";

/// Discord caps buttons at five per action row
const BUTTONS_PER_ROW: usize = 5;

/// Select menu requiring exactly four category picks.
pub fn create_category_menu(categories: &[String]) -> CreateComponents {
    CreateComponents::default()
        .create_action_row(|row| {
            row.create_select_menu(|menu| {
                menu.custom_id(CATEGORY_MENU_ID)
                    .placeholder(format!("Select exactly {CATEGORY_PICKS} categories"))
                    .min_values(CATEGORY_PICKS as u64)
                    .max_values(CATEGORY_PICKS as u64)
                    .options(|options| {
                        for name in categories {
                            options.create_option(|option| option.label(name).value(name));
                        }
                        options
                    })
            })
        })
        .to_owned()
}

/// One Success-style button per candidate map.
pub fn create_ban_buttons(maps: &[String]) -> CreateComponents {
    ban_buttons(maps, None)
}

/// Ban buttons after a pick landed: the banned map turns Danger and every
/// button disables.
pub fn create_resolved_ban_buttons(maps: &[String], banned: usize) -> CreateComponents {
    ban_buttons(maps, Some(banned))
}

fn ban_buttons(maps: &[String], banned: Option<usize>) -> CreateComponents {
    let mut components = CreateComponents::default();
    for (chunk_index, chunk) in maps.chunks(BUTTONS_PER_ROW).enumerate() {
        components.create_action_row(|row| {
            for (offset, map_name) in chunk.iter().enumerate() {
                let index = chunk_index * BUTTONS_PER_ROW + offset;
                row.create_button(|button| {
                    button
                        .custom_id(format!("{BAN_BUTTON_PREFIX}{index}"))
                        .label(map_name)
                        .style(if banned == Some(index) {
                            ButtonStyle::Danger
                        } else {
                            ButtonStyle::Success
                        })
                        .disabled(banned.is_some())
                });
            }
            row
        });
    }
    components
}

/// Recover the candidate index from a ban button's custom id.
pub fn ban_index_from_custom_id(custom_id: &str) -> Option<usize> {
    custom_id
        .strip_prefix(BAN_BUTTON_PREFIX)
        .and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn category_menu_requires_exactly_four() {
        let components = create_category_menu(&strings(&[
            "Control",
            "Escort",
            "Flashpoint",
            "Hybrid",
            "Assault",
            "Push",
        ]));
        assert_eq!(components.0.len(), 1);

        let menu = &components.0[0]["components"][0];
        assert_eq!(menu["custom_id"], serde_json::json!(CATEGORY_MENU_ID));
        assert_eq!(menu["min_values"], serde_json::json!(4));
        assert_eq!(menu["max_values"], serde_json::json!(4));
        assert_eq!(menu["options"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn ban_buttons_carry_indexed_ids() {
        let components = create_ban_buttons(&strings(&["Busan", "Ilios", "Nepal"]));
        assert_eq!(components.0.len(), 1);

        let row = components.0[0]["components"].as_array().unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[0]["custom_id"], serde_json::json!("veto_ban_0"));
        assert_eq!(row[2]["custom_id"], serde_json::json!("veto_ban_2"));
        assert_eq!(row[1]["label"], serde_json::json!("Ilios"));
    }

    #[test]
    fn long_lists_chunk_into_rows_of_five() {
        let maps: Vec<String> = (0..8).map(|i| format!("Map {i}")).collect();
        let components = create_ban_buttons(&maps);
        assert_eq!(components.0.len(), 2);
        let second_row = components.0[1]["components"].as_array().unwrap();
        assert_eq!(second_row[0]["custom_id"], serde_json::json!("veto_ban_5"));
    }

    #[test]
    fn resolved_buttons_disable_and_mark_the_ban() {
        let components = create_resolved_ban_buttons(&strings(&["Busan", "Ilios", "Nepal"]), 1);
        let row = components.0[0]["components"].as_array().unwrap();
        // Danger = 4, Success = 3 on the wire.
        assert_eq!(row[1]["style"], serde_json::json!(4));
        assert_eq!(row[0]["style"], serde_json::json!(3));
        for button in row {
            assert_eq!(button["disabled"], serde_json::json!(true));
        }
    }

    #[test]
    fn ban_index_round_trips() {
        assert_eq!(ban_index_from_custom_id("veto_ban_2"), Some(2));
        assert_eq!(ban_index_from_custom_id("veto_ban_x"), None);
        assert_eq!(ban_index_from_custom_id("veto_categories"), None);
    }
}
