//! AppIntent-, AppCommand- und EditorEvent-Enums für den Intent/Command-Datenfluss.

mod command;
mod editor_event;
mod intent;

pub use command::AppCommand;
pub use editor_event::EditorEvent;
pub use intent::{AppIntent, PointerButton};
