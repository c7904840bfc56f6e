//! HTTP handlers

mod auth;
mod cards;
mod health;
mod users;

pub use auth::{signin, signup};
pub use cards::{
    create_card, delete_card, get_card, like_card, list_cards, unlike_card, update_card,
};
pub use health::{health, method_not_allowed, not_found, ready};
pub use users::{get_me, get_user, list_users, update_avatar, update_me};
