use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;

pub const DESCRIPTION_SELECTOR: &str = ".day-desc";
pub const HEADING_SELECTOR: &str = "h2";
pub const SAMPLE_SELECTOR: &str = "pre code";
const TITLE_PATTERN: &str = r"---\s*Day\s*\d+:\s*(.*?)\s*---";

/// Everything scraped for a single puzzle day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRecord {
    pub title: String,
    /// Inner HTML of every description block, in document order.
    pub description: String,
    pub test_input: String,
    /// Empty when the input page could not be retrieved for this session.
    pub problem_input: String,
}

/// Queries the extractor needs from a parsed document.
pub trait DocumentQuery {
    type Element<'a>: ElementQuery
    where
        Self: 'a;

    fn select_all(&self, selector: &str) -> Result<Vec<Self::Element<'_>>, ExtractError>;

    fn select_first(&self, selector: &str) -> Result<Option<Self::Element<'_>>, ExtractError>;

    /// Rendered text of the whole document.
    fn text(&self) -> String;
}

pub trait ElementQuery {
    fn inner_html(&self) -> String;

    fn text(&self) -> String;

    /// Concatenated text of every descendant matching `selector`.
    fn find_text(&self, selector: &str) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct HtmlDocument(Html);

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self(Html::parse_document(html))
    }
}

fn selector(s: &str) -> Result<Selector, ExtractError> {
    Selector::parse(s).map_err(|_| ExtractError::Selector(s.to_string()))
}

impl DocumentQuery for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn select_all(&self, s: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        let selector = selector(s)?;
        Ok(self.0.select(&selector).collect())
    }

    fn select_first(&self, s: &str) -> Result<Option<ElementRef<'_>>, ExtractError> {
        let selector = selector(s)?;
        let first = self.0.select(&selector).next();
        Ok(first)
    }

    fn text(&self) -> String {
        self.0.root_element().text().collect()
    }
}

impl ElementQuery for ElementRef<'_> {
    fn inner_html(&self) -> String {
        ElementRef::inner_html(self)
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn find_text(&self, s: &str) -> Result<String, ExtractError> {
        let selector = selector(s)?;
        Ok(self.select(&selector).flat_map(|node| node.text()).collect())
    }
}

/// Pulls a [`DayRecord`] out of the day page and input page documents.
#[derive(Debug, Clone)]
pub struct Extractor {
    title: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            title: Regex::new(TITLE_PATTERN)?,
        })
    }

    /// Fills title, description and test input. `problem_input` is left empty.
    pub fn day_page<D: DocumentQuery>(&self, doc: &D) -> Result<DayRecord, ExtractError> {
        let mut record = DayRecord::default();

        for (idx, block) in doc.select_all(DESCRIPTION_SELECTOR)?.iter().enumerate() {
            record.description.push_str(&block.inner_html());
            if idx == 0 {
                let heading = block.find_text(HEADING_SELECTOR)?;
                record.title = self.title(&heading).unwrap_or_default().to_string();
            }
        }

        record.test_input = doc
            .select_first(SAMPLE_SELECTOR)?
            .map(|code| code.text())
            .unwrap_or_default();

        Ok(record)
    }

    /// The body goes through the HTML parser like the day page, so leading
    /// whitespace before the first text node is not preserved.
    pub fn input_page<D: DocumentQuery>(&self, doc: &D) -> String {
        strip_trailing_newline(&doc.text()).to_string()
    }

    /// Title captured from a `--- Day N: Title ---` heading.
    pub fn title<'a>(&self, heading: &'a str) -> Option<&'a str> {
        self.title
            .captures(heading)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Drops exactly one trailing `\n`, nothing else.
pub fn strip_trailing_newline(s: &str) -> &str {
    s.strip_suffix('\n').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct FakeElement {
        html: String,
        text: String,
        heading: String,
    }

    #[derive(Debug, Default)]
    struct FakeDocument {
        blocks: Vec<FakeElement>,
        sample: Option<FakeElement>,
        text: String,
    }

    impl ElementQuery for FakeElement {
        fn inner_html(&self) -> String {
            self.html.clone()
        }

        fn text(&self) -> String {
            self.text.clone()
        }

        fn find_text(&self, selector: &str) -> Result<String, ExtractError> {
            match selector {
                HEADING_SELECTOR => Ok(self.heading.clone()),
                _ => Ok(String::new()),
            }
        }
    }

    impl DocumentQuery for FakeDocument {
        type Element<'a> = FakeElement;

        fn select_all(&self, selector: &str) -> Result<Vec<FakeElement>, ExtractError> {
            match selector {
                DESCRIPTION_SELECTOR => Ok(self.blocks.clone()),
                _ => Ok(vec![]),
            }
        }

        fn select_first(&self, selector: &str) -> Result<Option<FakeElement>, ExtractError> {
            match selector {
                SAMPLE_SELECTOR => Ok(self.sample.clone()),
                _ => Ok(None),
            }
        }

        fn text(&self) -> String {
            self.text.clone()
        }
    }

    fn block(heading: &str, html: &str) -> FakeElement {
        FakeElement {
            html: html.to_string(),
            heading: heading.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn title_should_match_heading() {
        let extractor = Extractor::new().unwrap();
        assert_eq!(
            extractor.title("--- Day 7: Some Title ---"),
            Some("Some Title")
        );
        assert_eq!(
            extractor.title("---   Day 12:   Hot Springs   ---"),
            Some("Hot Springs")
        );
        assert_eq!(extractor.title("--- Part Two ---"), None);
        assert_eq!(extractor.title(""), None);
    }

    #[test]
    fn synthetic_document_should_concat_blocks_in_order() {
        let doc = FakeDocument {
            blocks: vec![
                block("--- Day 3: Gear Ratios ---", "<p>one</p>"),
                block("--- Part Two ---", "<p>two</p>"),
            ],
            sample: Some(FakeElement {
                text: "467..114..\n".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let record = Extractor::new().unwrap().day_page(&doc).unwrap();
        assert_eq!(record.title, "Gear Ratios");
        assert_eq!(record.description, "<p>one</p><p>two</p>");
        assert_eq!(record.test_input, "467..114..\n");
        assert!(record.problem_input.is_empty());
    }

    #[test]
    fn synthetic_document_without_matches_should_yield_empty_fields() {
        let doc = FakeDocument {
            blocks: vec![block("Not a puzzle heading", "<p>x</p>")],
            ..Default::default()
        };

        let record = Extractor::new().unwrap().day_page(&doc).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.description, "<p>x</p>");
        assert_eq!(record.test_input, "");
    }

    #[test]
    fn title_should_come_from_first_block_only() {
        let doc = FakeDocument {
            blocks: vec![
                block("--- Part Two ---", "<p>a</p>"),
                block("--- Day 9: Late Heading ---", "<p>b</p>"),
            ],
            ..Default::default()
        };

        let record = Extractor::new().unwrap().day_page(&doc).unwrap();
        assert_eq!(record.title, "");
    }

    #[test]
    fn strip_trailing_newline_should_remove_only_one() {
        assert_eq!(strip_trailing_newline("1\n2\n"), "1\n2");
        assert_eq!(strip_trailing_newline("1\n2\n\n"), "1\n2\n");
        assert_eq!(strip_trailing_newline("1 2 "), "1 2 ");
        assert_eq!(strip_trailing_newline(""), "");
    }

    #[test]
    fn parse_day_page_should_work() {
        let content = fs::read_to_string("fixtures/day07.html").unwrap();
        let doc = HtmlDocument::parse(&content);
        let record = Extractor::new().unwrap().day_page(&doc).unwrap();

        assert_eq!(record.title, "Camel Cards");
        assert!(record.description.starts_with("<h2>--- Day 7: Camel Cards ---</h2>"));
        assert!(record.description.contains("<h2 id=\"part2\">--- Part Two ---</h2>"));
        let first = record.description.find("Camel Cards").unwrap();
        let second = record.description.find("Part Two").unwrap();
        assert!(first < second);
        assert!(record.problem_input.is_empty());

        insta::assert_snapshot!(record.test_input.trim_end(), @r###"
        32T3K 765
        T55J5 684
        KK677 28
        KTJJT 220
        QQQJA 483
        "###);
    }

    #[test]
    fn parse_public_day_page_without_code_should_work() {
        let content = fs::read_to_string("fixtures/day01_public.html").unwrap();
        let doc = HtmlDocument::parse(&content);
        let record = Extractor::new().unwrap().day_page(&doc).unwrap();

        assert_eq!(record.title, "Not Quite Lisp");
        assert_eq!(record.test_input, "");
        assert!(!record.description.contains("Part Two"));
    }

    #[test]
    fn input_page_should_keep_all_but_last_newline() {
        let extractor = Extractor::new().unwrap();
        let doc = HtmlDocument::parse("3   4\n4   3\n2   5\n");
        assert_eq!(extractor.input_page(&doc), "3   4\n4   3\n2   5");

        let doc = HtmlDocument::parse("1\n2\n\n");
        assert_eq!(extractor.input_page(&doc), "1\n2\n");
    }
}
