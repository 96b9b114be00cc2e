//! Positioned word extraction through pdf-extract's output device, with its page text.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::{debug, trace};

use super::layout::{tokenize, DEFAULT_Y_TOLERANCE};
use super::{DeckReader, PageLayout, Result, Word};
use crate::error::PdfError;

/// Horizontal gap, as a fraction of the font size, that still joins two glyphs.
const WORD_GAP_EM: f64 = 0.1;

/// Baseline drift, as a fraction of the font size, tolerated within a word.
const BASELINE_DRIFT_EM: f64 = 0.5;

/// PDF reader producing tokenized page layouts.
pub struct PdfExtractor {
    y_tolerance: f64,
}

impl PdfExtractor {
    /// Create a new extractor with the default row tolerance.
    pub fn new() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
        }
    }

    /// Set the vertical tolerance used to group words into rows.
    pub fn with_y_tolerance(mut self, y_tolerance: f64) -> Self {
        self.y_tolerance = y_tolerance;
        self
    }

    /// Load a document, decrypting it when it only carries an empty password.
    ///
    /// Returns the document and the bytes pdf-extract should read. A parser
    /// panic on malformed input is reported as a parse error.
    fn load(&self, data: &[u8]) -> Result<(Document, Vec<u8>)> {
        let (doc, raw) = panic::catch_unwind(AssertUnwindSafe(|| Self::open(data)))
            .map_err(|_| PdfError::Parse("PDF parser panicked".to_string()))??;

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }
        Ok((doc, raw))
    }

    fn open(data: &[u8]) -> Result<(Document, Vec<u8>)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        if !doc.is_encrypted() {
            return Ok((doc, data.to_vec()));
        }

        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        // Objects are plaintext from here on
        if let Ok(encrypt_id) = doc.trailer.get(b"Encrypt").and_then(|o| o.as_reference()) {
            doc.objects.remove(&encrypt_id);
        }
        doc.trailer.remove(b"Encrypt");
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
        Ok((doc, decrypted))
    }

    /// Extract positioned words from every page. Pages that fail come back empty.
    pub fn extract_words(&self, doc: &Document) -> Vec<Vec<Word>> {
        doc.get_pages()
            .into_keys()
            .map(|number| {
                let mut collector = WordCollector::default();
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    pdf_extract::output_doc_page(doc, &mut collector, number)
                }));
                match outcome {
                    Ok(Ok(())) => {
                        trace!("Page {}: {} words", number, collector.words.len());
                        collector.words
                    }
                    Ok(Err(e)) => {
                        debug!("Page {} could not be read, skipping: {}", number, e);
                        Vec::new()
                    }
                    Err(_) => {
                        debug!("Page {} panicked, skipping", number);
                        Vec::new()
                    }
                }
            })
            .collect()
    }

    /// Plain page text from pdf-extract, when it can read the document.
    fn page_texts(raw: &[u8]) -> Option<Vec<String>> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(raw)
        }));
        match outcome {
            Ok(Ok(pages)) => Some(pages),
            Ok(Err(e)) => {
                debug!("pdf-extract failed, using row text: {:?}", e);
                None
            }
            Err(_) => {
                debug!("pdf-extract panicked, using row text");
                None
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckReader for PdfExtractor {
    fn read_pages(&self, data: &[u8]) -> Result<Vec<PageLayout>> {
        let (doc, raw) = self.load(data)?;
        let words = self.extract_words(&doc);
        let texts = Self::page_texts(&raw).filter(|t| t.len() == words.len());

        let pages = words
            .iter()
            .enumerate()
            .map(|(index, page_words)| {
                let layout = tokenize(index, page_words, self.y_tolerance);
                match texts.as_ref().map(|t| t[index].trim()) {
                    Some(text) if !text.is_empty() => layout.with_text(text),
                    _ => layout,
                }
            })
            .collect::<Vec<_>>();

        debug!("Read {} pages", pages.len());
        Ok(pages)
    }
}

/// Groups the glyphs pdf-extract places into words.
///
/// A glyph joins the current word when it sits on the same baseline and
/// starts where the previous glyph ended. Whitespace glyphs and visible
/// gaps close the word, separate show-text runs do not.
#[derive(Debug, Default)]
struct WordCollector {
    /// Page top in user space, for flipping to a top-left origin.
    top: f64,
    /// Baseline of the open word.
    baseline: f64,
    /// Font size of the open word in user space.
    size: f64,
    current: Option<Word>,
    words: Vec<Word>,
}

impl WordCollector {
    fn flush(&mut self) {
        if let Some(word) = self.current.take() {
            if !word.text.is_empty() {
                self.words.push(word);
            }
        }
    }

    fn continues(&self, word: &Word, x: f64, y: f64) -> bool {
        (y - self.baseline).abs() <= BASELINE_DRIFT_EM * self.size
            && x >= word.x1 - BASELINE_DRIFT_EM * self.size
            && x <= word.x1 + WORD_GAP_EM * self.size
    }
}

impl OutputDev for WordCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.current = None;
        self.words.clear();
        self.top = media_box.ury;
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        if char.trim().is_empty() {
            self.flush();
            return Ok(());
        }

        let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
        let size = font_size * scale;
        let x = trm.m31;
        let y = self.top - trm.m32;
        let advance = (width * font_size + spacing) * scale;

        let joins = match &self.current {
            Some(word) => self.continues(word, x, y),
            None => false,
        };
        if !joins {
            self.flush();
            self.baseline = y;
            self.size = size;
            self.current = Some(Word::new("", x, y - size, x, y));
        }

        if let Some(word) = self.current.as_mut() {
            word.text.push_str(char);
            word.x1 = word.x1.max(x + advance);
            word.y0 = word.y0.min(y - size);
            word.y1 = word.y1.max(y);
        }
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream, StringFormat};

    use crate::metrics::DeckParser;
    use crate::models::{CompanyProfile, MetricKey};

    /// One BT block at `(x, y)`; each `|`-separated run gets its own Tj.
    type Line<'a> = (i64, i64, &'a str);

    fn line_ops((x, y, runs): &Line<'_>) -> Vec<Operation> {
        let mut ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![(*x).into(), (*y).into()]),
        ];
        ops.extend(runs.split('|').map(|run| {
            Operation::new(
                "Tj",
                vec![Object::String(run.as_bytes().to_vec(), StringFormat::Literal)],
            )
        }));
        ops.push(Operation::new("ET", vec![]));
        ops
    }

    /// A4 document in Helvetica, one entry of `pages` per page.
    fn build_pdf(pages: &[&[Line<'_>]]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for lines in pages {
            let content: Content<Vec<Operation>> = Content {
                operations: lines.iter().flat_map(line_ops).collect(),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn to_bytes(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn texts(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        let extractor = PdfExtractor::new();
        assert!(extractor.read_pages(b"not a pdf").is_err());
        assert!(extractor.read_pages(b"%PDF-1.5\n1 0 obj << /Type").is_err());
    }

    #[test]
    fn test_reads_words_from_generated_pdf() {
        let doc = build_pdf(&[&[(72, 700, "Key Highlights")]]);

        let words = PdfExtractor::new().extract_words(&doc);
        assert_eq!(words.len(), 1);
        assert_eq!(texts(&words[0]), vec!["Key", "Highlights"]);
        assert!(words[0][0].x0 >= 72.0 - 1e-6);
        assert!(words[0][0].x1 < words[0][1].x0 + 1e-6);
        // Baseline 700 on an 842pt page, 12pt glyphs
        assert!((words[0][0].y1 - 142.0).abs() < 1e-6);
        assert!((words[0][0].y0 - 130.0).abs() < 1e-6);
    }

    #[test]
    fn test_adjacent_show_text_runs_form_one_word() {
        let doc = build_pdf(&[&[
            (300, 700, "Q3|FY26"),
            (400, 700, "Q2|FY26"),
        ]]);

        let words = PdfExtractor::new().extract_words(&doc);
        assert_eq!(texts(&words[0]), vec!["Q3FY26", "Q2FY26"]);
    }

    #[test]
    fn test_three_page_deck_from_pdf_bytes() {
        let bytes = to_bytes(build_pdf(&[
            &[
                (72, 780, "Key Highlights"),
                (72, 740, "AUM Rs. 47,709 Cr"),
            ],
            &[
                (72, 780, "Particulars"),
                (300, 780, "Q3|FY25"),
                (400, 780, "Q2|FY26"),
                (500, 780, "Q3|FY26"),
                (40, 740, "Net Interest Income"),
                (300, 740, "1,200"),
                (400, 740, "1,350"),
                (500, 740, "1,420"),
                (40, 700, "Profit after Tax"),
                (305, 700, "450"),
                (405, 700, "480"),
                (505, 700, "510"),
            ],
            &[
                (72, 780, "Asset Quality"),
                (40, 740, "GNPA (%)"),
                (300, 740, "1.59"),
                (40, 700, "Net NPA (%)"),
                (300, 700, "0.81"),
            ],
        ]));

        let pages = PdfExtractor::new().read_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(
            pages[1].rows[0].text(),
            "Particulars Q3FY25 Q2FY26 Q3FY26"
        );

        let company = CompanyProfile::new("demo", "Demo Finance", "500000", "DEMO");
        let metrics = DeckParser::new().parse(&pages, &company);

        assert_eq!(metrics.get(MetricKey::AumCr), Some(47709.0));
        assert_eq!(metrics.get(MetricKey::NiiCr), Some(1420.0));
        assert_eq!(metrics.get(MetricKey::PatCr), Some(510.0));
        assert_eq!(metrics.get(MetricKey::GnpaPct), Some(1.59));
        assert_eq!(metrics.get(MetricKey::NnpaPct), Some(0.81));
    }
}
