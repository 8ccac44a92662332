use crate::io::output::OutputWriter;
use crate::pipeline::Evaluation;
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
    fn write_evaluation(&mut self, evaluation: &Evaluation) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(evaluation)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
