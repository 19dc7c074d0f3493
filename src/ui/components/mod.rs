pub mod hud;
pub mod intro;
pub mod question_card;
pub mod summary;
