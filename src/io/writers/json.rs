use crate::core::model::InterfaceModel;
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_model(&mut self, model: &InterfaceModel) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(model)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
