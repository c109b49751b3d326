pub mod json;
pub mod terminal;

use crate::view_model::ViewModel;

pub use json::JsonWriter;
pub use terminal::TerminalWriter;

pub trait ViewModelWriter {
    fn write_view_model(&mut self, view_model: &ViewModel) -> anyhow::Result<()>;
}
