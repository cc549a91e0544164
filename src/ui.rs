//! Clickable menu buttons, laid out in world coordinates.

use crate::config::GameConfig;
use crate::entities::Rect;

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    StartGame,
    Exit,
    Restart,
    MainMenu,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub action: ButtonAction,
}

impl Button {
    /// Horizontally centred, top edge at `half_height + dy`.
    fn centred(config: &GameConfig, dy: f32, label: &'static str, action: ButtonAction) -> Self {
        let x = (config.screen_width / 2.0).floor() - BUTTON_WIDTH / 2.0;
        let y = (config.screen_height / 2.0).floor() + dy;
        Self {
            rect: Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            label,
            action,
        }
    }

    pub fn is_clicked(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }
}

pub fn menu_buttons(config: &GameConfig) -> [Button; 2] {
    [
        Button::centred(config, -25.0, "Start Game", ButtonAction::StartGame),
        Button::centred(config, 50.0, "Exit", ButtonAction::Exit),
    ]
}

pub fn game_over_buttons(config: &GameConfig) -> [Button; 2] {
    [
        Button::centred(config, 25.0, "Restart", ButtonAction::Restart),
        Button::centred(config, 100.0, "Main Menu", ButtonAction::MainMenu),
    ]
}

pub fn button_at(buttons: &[Button], x: f32, y: f32) -> Option<ButtonAction> {
    buttons.iter().find(|b| b.is_clicked(x, y)).map(|b| b.action)
}
