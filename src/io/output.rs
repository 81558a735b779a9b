//! Analysis report writers

use chrono::Utc;
use colored::*;
use std::io::Write;

use crate::core::Analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_analysis(&mut self, analysis: &Analysis) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_analysis(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(analysis)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", analysis.title)?;
        writeln!(self.writer)?;
        if !analysis.description.is_empty() {
            writeln!(self.writer, "{}", analysis.description)?;
            writeln!(self.writer)?;
        }
        writeln!(
            self.writer,
            "Generated: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Model family: {}", analysis.model_family.badge())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_parameters(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        writeln!(self.writer, "## Parameters")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Name | Kind | Default | Bounds | Required |"
        )?;
        writeln!(self.writer, "|------|------|---------|--------|----------|")?;
        for param in &analysis.parameters {
            let bounds = match (param.min, param.max) {
                (Some(min), Some(max)) => format!("{min}..{max}"),
                _ => "-".to_string(),
            };
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                param.name,
                param.kind.display_name(),
                param.effective_default(),
                bounds,
                if param.required { "yes" } else { "no" },
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_outputs(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        writeln!(self.writer, "## Outputs")?;
        writeln!(self.writer)?;
        for output in &analysis.outputs {
            writeln!(
                self.writer,
                "- {} ({})",
                output.name,
                output.kind.display_name()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_environment(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        writeln!(self.writer, "## Environment")?;
        writeln!(self.writer)?;
        if analysis.packages.is_empty() {
            writeln!(self.writer, "No required packages detected.")?;
        } else {
            let packages: Vec<_> = analysis.packages.iter().cloned().collect();
            writeln!(self.writer, "Packages: {}", packages.join(", "))?;
        }
        let mut frameworks = Vec::new();
        if analysis.has_gradio {
            frameworks.push("gradio");
        }
        if analysis.has_flask {
            frameworks.push("flask");
        }
        if analysis.has_fastapi {
            frameworks.push("fastapi");
        }
        if !frameworks.is_empty() {
            writeln!(self.writer, "Frameworks: {}", frameworks.join(", "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_analysis(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        self.write_header(analysis)?;
        self.write_parameters(analysis)?;
        self.write_outputs(analysis)?;
        self.write_environment(analysis)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_analysis(&mut self, analysis: &Analysis) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", analysis.title.bold())?;
        if !analysis.description.is_empty() {
            writeln!(self.writer, "{}", analysis.description.dimmed())?;
        }
        writeln!(
            self.writer,
            "{} {}",
            "Model family:".cyan(),
            analysis.model_family.badge()
        )?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} ({})",
            "Parameters".green().bold(),
            analysis.parameters.len()
        )?;
        for param in &analysis.parameters {
            let required = if param.required { "" } else { " (optional)" };
            writeln!(
                self.writer,
                "  {} [{}] default {}{}",
                param.name.yellow(),
                param.kind.display_name(),
                param.effective_default(),
                required.dimmed(),
            )?;
        }
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} ({})",
            "Outputs".green().bold(),
            analysis.outputs.len()
        )?;
        for output in &analysis.outputs {
            writeln!(
                self.writer,
                "  {} [{}]",
                output.name.yellow(),
                output.kind.display_name()
            )?;
        }

        if !analysis.packages.is_empty() {
            writeln!(self.writer)?;
            let packages: Vec<_> = analysis.packages.iter().cloned().collect();
            writeln!(
                self.writer,
                "{} {}",
                "Packages:".cyan(),
                packages.join(", ")
            )?;
        }

        Ok(())
    }
}

/// Build a writer for the requested format and destination
pub fn create_writer(
    format: OutputFormat,
    destination: Box<dyn Write>,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers;
    use crate::io::notebook::Cell;

    fn sample_analysis() -> Analysis {
        let cells = vec![
            Cell::markdown("# Demo\nMakes pictures."),
            Cell::code("!pip install diffusers\nprompt = ''\nwidth = 768"),
        ];
        analyzers::analyze(&cells, "demo.ipynb")
    }

    #[test]
    fn json_writer_emits_round_trippable_output() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_analysis(&sample_analysis())
            .unwrap();
        let back: Analysis = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back.title, "Demo");
        assert!(back.parameter("width").is_some());
    }

    #[test]
    fn markdown_writer_tables_every_parameter() {
        let analysis = sample_analysis();
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf).write_analysis(&analysis).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# Demo"));
        for param in &analysis.parameters {
            assert!(text.contains(&format!("| {} |", param.name)));
        }
        assert!(text.contains("diffusers"));
    }

    #[test]
    fn terminal_writer_lists_outputs() {
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf)
            .write_analysis(&sample_analysis())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("generated_image"));
    }
}
