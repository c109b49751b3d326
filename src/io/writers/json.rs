use crate::io::writers::ViewModelWriter;
use crate::view_model::ViewModel;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ViewModelWriter for JsonWriter<W> {
    fn write_view_model(&mut self, view_model: &ViewModel) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(view_model)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
