use crate::error::{DocTextError, Result};
use crate::reader::DocumentReader;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Main document part inside a .docx package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Reads body paragraphs out of a .docx file.
///
/// A .docx file is a ZIP archive; the text lives in `word/document.xml`,
/// which is streamed with quick-xml rather than loaded into a DOM.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxReader;

impl DocxReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for DocxReader {
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| DocTextError::from(e).with_document_path(path))?;

        let part = match archive.by_name(DOCUMENT_PART) {
            Ok(part) => part,
            Err(ZipError::FileNotFound) => {
                return Err(DocTextError::MissingDocumentPart {
                    path: path.display().to_string(),
                    part: DOCUMENT_PART.to_string(),
                })
            }
            Err(e) => return Err(DocTextError::from(e).with_document_path(path)),
        };

        let paragraphs =
            parse_body_paragraphs(BufReader::new(part)).map_err(|e| e.with_document_path(path))?;

        tracing::debug!(
            path = %path.display(),
            paragraphs = paragraphs.len(),
            "parsed document body"
        );
        Ok(paragraphs)
    }
}

/// Parse the paragraphs that are direct children of `w:body`.
///
/// Paragraph text is the concatenation of its runs' `w:t` content, with
/// `w:tab` as a tab and `w:br`/`w:cr` as a newline. Runs wrapped in
/// hyperlinks, smart tags or content controls count; paragraphs nested in
/// tables or text boxes do not.
pub fn parse_body_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(source);
    let mut collector = ParagraphCollector::default();
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => collector.open(e.local_name().as_ref()),
            Event::Empty(e) => {
                let name = e.local_name();
                collector.open(name.as_ref());
                collector.close(name.as_ref());
            }
            Event::End(e) => collector.close(e.local_name().as_ref()),
            Event::Text(e) => {
                if collector.in_text {
                    let text = e.unescape()?;
                    collector.push_str(&text);
                }
            }
            Event::CData(e) => {
                if collector.in_text {
                    collector.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(collector.paragraphs)
}

#[derive(Debug, Default)]
struct ParagraphCollector {
    stack: Vec<Vec<u8>>,
    paragraphs: Vec<String>,
    current: Option<String>,
    // paragraphs opened inside the current body paragraph (text boxes)
    nested: usize,
    in_text: bool,
}

impl ParagraphCollector {
    fn parent(&self) -> Option<&[u8]> {
        self.stack.last().map(Vec::as_slice)
    }

    fn collecting(&self) -> bool {
        self.current.is_some() && self.nested == 0
    }

    fn in_run(&self) -> bool {
        self.collecting() && self.parent() == Some(b"r".as_slice())
    }

    fn open(&mut self, name: &[u8]) {
        match name {
            b"p" if self.current.is_some() => self.nested += 1,
            b"p" if self.parent() == Some(b"body".as_slice()) => {
                self.current = Some(String::new());
            }
            b"t" if self.in_run() => self.in_text = true,
            b"tab" if self.in_run() => self.push_str("\t"),
            b"br" | b"cr" if self.in_run() => self.push_str("\n"),
            b"noBreakHyphen" if self.in_run() => self.push_str("-"),
            _ => {}
        }
        self.stack.push(name.to_vec());
    }

    fn close(&mut self, name: &[u8]) {
        self.stack.pop();
        match name {
            b"t" => self.in_text = false,
            b"p" if self.nested > 0 => self.nested -= 1,
            b"p" => {
                if let Some(paragraph) = self.current.take() {
                    self.paragraphs.push(paragraph);
                }
            }
            _ => {}
        }
    }

    fn push_str(&mut self, text: &str) {
        if let Some(current) = self.current.as_mut() {
            current.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{document_xml, write_docx};
    use tempfile::TempDir;

    fn parse(body: &str) -> Vec<String> {
        parse_body_paragraphs(document_xml(body).as_bytes()).unwrap()
    }

    #[test]
    fn test_paragraph_order_and_empty_paragraphs() {
        let paragraphs = parse(
            r#"<w:p><w:r><w:t>Hello</w:t></w:r></w:p>
               <w:p/>
               <w:p><w:pPr><w:jc w:val="center"/></w:pPr></w:p>
               <w:p><w:r><w:t>World</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["Hello", "", "", "World"]);
    }

    #[test]
    fn test_runs_are_concatenated() {
        let paragraphs = parse(
            r#"<w:p>
                 <w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r>
                 <w:r><w:t xml:space="preserve"> and </w:t></w:r>
                 <w:hyperlink r:id="rId1"><w:r><w:t>linked</w:t></w:r></w:hyperlink>
               </w:p>"#,
        );
        assert_eq!(paragraphs, vec!["Bold and linked"]);
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs() {
        let paragraphs = parse(
            r#"<w:p>
                 <w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
                 <w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r>
               </w:p>"#,
        );
        assert_eq!(paragraphs, vec!["a\tb\nc"]);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let paragraphs = parse(r#"<w:p><w:r><w:t>Fish &amp; Chips &lt;3</w:t></w:r></w:p>"#);
        assert_eq!(paragraphs, vec!["Fish & Chips <3"]);
    }

    #[test]
    fn test_tables_and_deleted_text_are_ignored() {
        let paragraphs = parse(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p>
               <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
               <w:p>
                 <w:r><w:t>kept</w:t></w:r>
                 <w:del><w:r><w:delText>gone</w:delText></w:r></w:del>
                 <w:r><w:instrText> PAGE </w:instrText></w:r>
               </w:p>"#,
        );
        assert_eq!(paragraphs, vec!["Before", "kept"]);
    }

    #[test]
    fn test_text_box_paragraphs_are_ignored() {
        let paragraphs = parse(
            r#"<w:p>
                 <w:r><w:t>outer</w:t></w:r>
                 <w:r><w:pict><v:textbox><w:txbxContent>
                   <w:p><w:r><w:t>inner</w:t></w:r></w:p>
                 </w:txbxContent></v:textbox></w:pict></w:r>
                 <w:r><w:t> text</w:t></w:r>
               </w:p>
               <w:p><w:r><w:t>next</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["outer text", "next"]);
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_body_paragraphs(
            document_xml("<w:p><w:r><w:t>unclosed</w:r></w:p>").as_bytes(),
        );
        assert!(matches!(result, Err(DocTextError::MalformedXml { .. })));
    }

    #[test]
    fn test_read_docx_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.docx");
        write_docx(&path, &["Hello", "", "World"]);

        let paragraphs = DocxReader::new().read_paragraphs(&path).unwrap();
        assert_eq!(paragraphs, vec!["Hello", "", "World"]);
    }

    #[test]
    fn test_not_a_zip_archive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.docx");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let result = DocxReader::new().read_paragraphs(&path);
        match result {
            Err(DocTextError::UnreadableDocument { path: p, .. }) => {
                assert_eq!(p, path.display().to_string())
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_archive_without_document_part() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.docx");
        crate::test_support::write_zip(&path, &[("word/styles.xml", "<w:styles/>")]);

        let result = DocxReader::new().read_paragraphs(&path);
        assert!(matches!(result, Err(DocTextError::MissingDocumentPart { .. })));
    }

    #[test]
    fn test_nonexistent_file() {
        let result = DocxReader::new().read_paragraphs(Path::new("/nonexistent/file.docx"));
        assert!(matches!(result, Err(DocTextError::Io(_))));
    }
}
