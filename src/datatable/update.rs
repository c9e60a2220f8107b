use iced::advanced::mouse;
use iced::keyboard::{self, key};
use iced::Rectangle;

use super::{State, Status};

#[derive(Clone)]
pub enum Update<Message: Clone> {
    /// The runtime requested a redraw; dirty contents rebuild their
    /// geometry here.
    RedrawRequested,
    /// A click landed inside the table.
    Click(mouse::Click),
    /// Call some binding.
    Binding(Binding<Message>),
}

#[derive(Clone, PartialEq)]
pub enum Binding<Message: Clone> {
    /// Toggle selection of every row.
    ToggleAll,
    /// Move the active row by the given [`Motion`].
    MoveActive(Motion),
    /// Activate the active row.
    Activate,
    /// Toggle selection of the active row.
    Toggle,
    /// Focus the table.
    Focus,
    /// Unfocus the table.
    Unfocus,
    /// Clicked outside the table.
    ClickedOutside,
    /// Produce the given message.
    Custom(Message),
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// The key pressed.
    pub key: keyboard::Key,
    /// The state of the keyboard modifiers.
    pub modifiers: keyboard::Modifiers,
    /// The current [`Status`] of the table.
    pub status: Status,
}

impl<Message: Clone> Update<Message> {
    pub(super) fn from_event(
        event: &iced::Event,
        state: &State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
        key_binding: Option<&dyn Fn(KeyPress) -> Option<Binding<Message>>>,
    ) -> Option<Self> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    let click = mouse::Click::new(position, mouse::Button::Left, state.last_click);

                    Some(Update::Click(click))
                } else if state.is_focused() {
                    Some(Update::Binding(Binding::ClickedOutside))
                } else {
                    None
                }
            }
            iced::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                let status = if state.is_focused() {
                    Status::Focused
                } else {
                    Status::Unfocused
                };

                let key_press = KeyPress {
                    key: key.clone(),
                    modifiers: *modifiers,
                    status,
                };

                if let Some(key_binding) = key_binding {
                    key_binding(key_press)
                } else {
                    Binding::from_key_press(key_press)
                }
                .map(Self::Binding)
            }
            iced::Event::Window(iced::window::Event::RedrawRequested(_)) => {
                Some(Update::RedrawRequested)
            }
            _ => None,
        }
    }
}

impl<Message: Clone> Binding<Message> {
    /// Returns the default [`Binding`] for the given key press.
    pub fn from_key_press(event: KeyPress) -> Option<Self> {
        let KeyPress {
            key,
            modifiers,
            status,
        } = event;

        if status != Status::Focused {
            return None;
        }

        match key.as_ref() {
            keyboard::Key::Named(key::Named::Enter) => Some(Self::Activate),
            keyboard::Key::Named(key::Named::Space) => Some(Self::Toggle),
            keyboard::Key::Named(key::Named::Escape) => Some(Self::Unfocus),
            keyboard::Key::Character("a") if modifiers.command() => Some(Self::ToggleAll),
            keyboard::Key::Named(named_key) => motion(named_key).map(Self::MoveActive),
            _ => None,
        }
    }
}

fn motion(key: key::Named) -> Option<Motion> {
    match key {
        key::Named::ArrowUp => Some(Motion::Up),
        key::Named::ArrowDown => Some(Motion::Down),
        key::Named::Home => Some(Motion::Home),
        key::Named::End => Some(Motion::End),
        _ => None,
    }
}

/// A movement of the active row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Move one row up.
    Up,
    /// Move one row down.
    Down,
    /// Move to the first row.
    Home,
    /// Move to the last row.
    End,
}

impl<Message: Clone> std::fmt::Debug for Update<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedrawRequested => write!(f, "RedrawRequested"),
            Self::Click(click) => write!(f, "Click({click:?})"),
            Self::Binding(binding) => write!(f, "Binding({binding:?})"),
        }
    }
}

impl<Message: Clone> std::fmt::Debug for Binding<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToggleAll => write!(f, "ToggleAll"),
            Self::MoveActive(motion) => write!(f, "MoveActive({motion:?})"),
            Self::Activate => write!(f, "Activate"),
            Self::Toggle => write!(f, "Toggle"),
            Self::Focus => write!(f, "Focus"),
            Self::Unfocus => write!(f, "Unfocus"),
            Self::ClickedOutside => write!(f, "ClickedOutside"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}
