//! Text extraction from various file formats

use crate::error::{MatcherError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static DOCX_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("Invalid DOCX break regex")
});

static DOCX_TAB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:tab\s*/>").expect("Invalid DOCX tab regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|lt|gt|quot|apos|amp|nbsp);").expect("Invalid entity regex")
});

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            MatcherError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Self::extract_from_bytes(&bytes).map_err(|e| match e {
            MatcherError::DocxExtraction(msg) => MatcherError::DocxExtraction(format!(
                "Failed to extract text from DOCX '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}

impl DocxExtractor {
    /// Paragraph text from `word/document.xml`, one paragraph per line
    pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut xml = String::new();
        archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;

        let with_breaks = DOCX_BREAK.replace_all(&xml, "\n");
        let with_tabs = DOCX_TAB.replace_all(&with_breaks, " ");
        let stripped = TAG.replace_all(&with_tabs, "");

        let lines: Vec<String> = decode_entities(&stripped)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        // invalid UTF-8 is replaced, not fatal
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(self.markdown_to_text(&String::from_utf8_lossy(&bytes)))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let text = html_output
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");

        let clean_text = TAG.replace_all(&text, "");

        let lines: Vec<String> = decode_entities(&clean_text)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Single pass, so `&amp;lt;` decodes to `&lt;` and not `<`
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                "nbsp" => Some(' '),
                _ => {
                    let code = match entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            // unrepresentable code points become a space
            decoded.unwrap_or(' ').to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>Skills:</w:t><w:tab/><w:t>Python &amp; SQL</w:t></w:r></w:p>
            </w:body></w:document>"#;

        let text = DocxExtractor::extract_from_bytes(&build_docx(xml)).unwrap();
        assert_eq!(text, "Jane Doe\nSkills: Python & SQL");
    }

    #[test]
    fn test_docx_without_document_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = DocxExtractor::extract_from_bytes(&bytes);
        assert!(matches!(result, Err(MatcherError::DocxExtraction(_))));
    }

    #[test]
    fn test_docx_not_a_zip() {
        let result = DocxExtractor::extract_from_bytes(b"plain text pretending to be docx");
        assert!(matches!(result, Err(MatcherError::DocxExtraction(_))));
    }

    #[test]
    fn test_numeric_character_references() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Jane&#8217;s CV &#x2013; Rust &#38; Go</w:t></w:r></w:p>
            <w:p><w:r><w:t>&amp;lt;tag&amp;gt; &#xFFFFFFFF;end</w:t></w:r></w:p>
            </w:body></w:document>"#;

        let text = DocxExtractor::extract_from_bytes(&build_docx(xml)).unwrap();
        assert_eq!(text, "Jane\u{2019}s CV \u{2013} Rust & Go\n&lt;tag&gt;  end");
    }

    #[tokio::test]
    async fn test_markdown_with_invalid_utf8_is_decoded_lossily() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(b"# Skills\n\nRust \xff\xfe Docker\n").unwrap();

        let text = MarkdownExtractor.extract(file.path()).await.unwrap();
        assert!(text.contains("Skills"));
        assert!(text.contains("Rust \u{FFFD}\u{FFFD} Docker"));
    }

    #[test]
    fn test_markdown_to_text() {
        let text = MarkdownExtractor.markdown_to_text("# Jane\n\n**Rust** & *Go*\n\n- Docker\n- AWS\n");
        assert!(text.contains("Jane"));
        assert!(text.contains("Rust & Go"));
        assert!(text.contains("Docker"));
        assert!(!text.contains("**"));
        assert!(!text.contains('<'));
    }
}
