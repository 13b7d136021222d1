//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// String-based SVG writer for WASM/browser use
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[render::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[render::svg] SVG output is not valid UTF-8")
    }
}

/// Write the XML declaration and opening `<svg>` tag.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64, class: &str) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" class="{class}"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}">"##)?;
    Ok(())
}

/// Write a `<defs><style>` block.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W, css: &str) -> Result<()> {
    writeln!(writer, "<defs>\n<style>\n{css}</style>\n</defs>")?;
    Ok(())
}

pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Escape text content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{SvgStringWriter, SvgWriter, escape, write_svg_footer, write_svg_header};

    #[test]
    fn string_writer_collects_document() {
        let mut writer = SvgStringWriter::new();
        write_svg_header(&mut writer, 100.0, 50.0, "map").unwrap();
        write!(writer, "<g/>").unwrap();
        write_svg_footer(&mut writer).unwrap();

        let svg = writer.into_string().unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let mut writer = SvgWriter::new(&path).unwrap();
        write_svg_footer(&mut writer).unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "</svg>\n");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"A & B <"c">"#), "A &amp; B &lt;&quot;c&quot;&gt;");
        assert_eq!(escape("Average sq footage"), "Average sq footage");
    }
}
