// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use regex::Regex;
use tracing::debug;

const ENTITIES: &[(&str, &str)] = &[
  ("&nbsp;", " "),
  ("&lt;", "<"),
  ("&gt;", ">"),
  ("&quot;", "\""),
  ("&#39;", "'"),
  ("&apos;", "'"),
  ("&deg;", "°"),
  ("&amp;", "&"),
];

/// Pulls a station's water temperature out of an OMR report.
///
/// Two patterns are tried in order and the first one that matches wins:
/// the label followed by dots/whitespace and a number (`CHICAGO SHORE.....47`),
/// then a looser form that lets anything, newlines included, sit between the
/// label and a number with an `F` unit (`CHICAGO SHORE  text 47 F`).
#[derive(Debug, Clone)]
pub struct ReportParser {
  label: String,
  tight: Regex,
  loose: Regex,
  hidden: Regex,
  comments: Regex,
  tags: Regex,
  char_refs: Regex,
}

impl ReportParser {
  pub fn new(label: &str) -> Result<Self, Error> {
    let label = label.trim();
    if label.is_empty() {
      return Err(Error::ConfigError("Station label cannot be empty".into()));
    }

    let escaped = regex::escape(label);

    Ok(Self {
      label: label.to_string(),
      tight: Regex::new(&format!(r"(?i){}[.\s]+(\d+)", escaped))?,
      loose: Regex::new(&format!(r"(?is){}.*?(\d+)\s*F", escaped))?,
      hidden: Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")?,
      comments: Regex::new(r"(?s)<!--.*?-->")?,
      tags: Regex::new(r"(?s)<[^>]*>")?,
      char_refs: Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));")?,
    })
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn parse_html(&self, html: &str) -> Result<i32, Error> {
    self.parse_text(&self.strip_html(html))
  }

  pub fn parse_text(&self, text: &str) -> Result<i32, Error> {
    let captured = self
      .tight
      .captures(text)
      .or_else(|| self.loose.captures(text))
      .and_then(|caps| caps.get(1))
      .ok_or_else(|| Error::ReadingNotFound(self.label.clone()))?;

    debug!("Matched reading '{}' for {}", captured.as_str(), self.label);

    captured.as_str().parse::<i32>().map_err(|e| {
      Error::ParseError(format!(
        "'{}' is not a temperature: {}",
        captured.as_str(),
        e
      ))
    })
  }

  pub fn strip_html(&self, html: &str) -> String {
    let text = self.hidden.replace_all(html, "");
    let text = self.comments.replace_all(&text, "");
    let text = self.tags.replace_all(&text, "");
    let text = self.decode_char_refs(&text);

    ENTITIES
      .iter()
      .fold(text, |acc, (entity, plain)| acc.replace(entity, plain))
  }

  /// `&#NNN;` and `&#xHH;`. References that are not valid scalar values are kept as written.
  fn decode_char_refs(&self, text: &str) -> String {
    self
      .char_refs
      .replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
          (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
          (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
          (None, None) => None,
        };

        match code.and_then(char::from_u32) {
          Some('\u{a0}') => " ".to_string(),
          Some(c) if c != '\0' => c.to_string(),
          _ => caps[0].to_string(),
        }
      })
      .into_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const REPORT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>National Weather Service Text Product Display</title>
  <style>pre { font-size: 12px; } .x { width: 99px; }</style>
  <script>var CHICAGO_SHORE_ID = 12;</script>
</head>
<body>
<!-- CHICAGO SHORE 00 F cached copy -->
<pre class="glossaryProduct">
000
SXUS43 KLOT 141505
OMRLOT

LAKE MICHIGAN WATER TEMPERATURES
NATIONAL WEATHER SERVICE CHICAGO/ROMEOVILLE IL

WATER TEMPERATURES...

CALUMET HARBOR..........49.
CHICAGO SHORE...........47.
WILMETTE HARBOR.........46.

&amp;&amp;
</pre>
</body>
</html>"#;

  fn parser() -> ReportParser {
    ReportParser::new("CHICAGO SHORE").unwrap()
  }

  #[test]
  fn dotted_leader_reading() {
    assert_eq!(parser().parse_text("CHICAGO SHORE...........47.").unwrap(), 47);
  }

  #[test]
  fn loose_pattern_with_unit() {
    assert_eq!(parser().parse_text("CHICAGO SHORE  text 47 F").unwrap(), 47);
  }

  #[test]
  fn loose_pattern_spans_lines() {
    let text = "CHICAGO SHORE\nWATER TEMP\n  52 F\n";
    assert_eq!(parser().parse_text(text).unwrap(), 52);
  }

  #[test]
  fn label_is_case_insensitive() {
    assert_eq!(parser().parse_text("Chicago Shore.....61").unwrap(), 61);
  }

  #[test]
  fn missing_label_is_not_found() {
    let err = parser()
      .parse_text("CALUMET HARBOR..........49.")
      .unwrap_err();
    assert!(matches!(err, Error::ReadingNotFound(label) if label == "CHICAGO SHORE"));
  }

  #[test]
  fn non_numeric_reading_is_not_found() {
    let err = parser().parse_text("CHICAGO SHORE...........N/A.").unwrap_err();
    assert!(matches!(err, Error::ReadingNotFound(_)));
  }

  #[test]
  fn overflowing_digits_are_a_parse_error() {
    let err = parser()
      .parse_text("CHICAGO SHORE...99999999999")
      .unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
  }

  #[test]
  fn tight_pattern_takes_precedence() {
    let text = "CHICAGO SHORE: 12 F earlier\nCHICAGO SHORE...........47.";
    assert_eq!(parser().parse_text(text).unwrap(), 47);
  }

  #[test]
  fn label_is_matched_literally() {
    let parser = ReportParser::new("ST. JOSEPH (MI)").unwrap();
    assert_eq!(parser.parse_text("ST. JOSEPH (MI)......55.").unwrap(), 55);
    assert!(parser.parse_text("STX JOSEPH (MI)......55.").is_err());
  }

  #[test]
  fn empty_label_is_rejected() {
    assert!(matches!(
      ReportParser::new("  "),
      Err(Error::ConfigError(_))
    ));
  }

  #[test]
  fn strips_markup_scripts_and_entities() {
    let text = parser().strip_html(REPORT_PAGE);

    assert!(text.contains("CHICAGO SHORE...........47."));
    assert!(text.contains("&&"));
    assert!(!text.contains("<pre"));
    assert!(!text.contains("CHICAGO_SHORE_ID"));
    assert!(!text.contains("cached copy"));
    assert!(!text.contains("font-size"));
  }

  #[test]
  fn numeric_references_are_decoded() {
    let parser = parser();

    assert_eq!(
      parser.parse_html("<pre>CHICAGO SHORE...........&#52;&#55;.</pre>").unwrap(),
      47
    );
    assert_eq!(
      parser.parse_html("<pre>CHICAGO&#160;SHORE&#x2E;&#X2e;&#46;&#x35;&#x31;.</pre>").unwrap(),
      51
    );
    assert_eq!(
      parser.strip_html("CHICAGO&#160;SHORE... &#176;F"),
      "CHICAGO SHORE... °F"
    );
  }

  #[test]
  fn invalid_references_are_left_alone() {
    let parser = parser();

    assert_eq!(parser.strip_html("&#xD800; &#0; &#99999999;"), "&#xD800; &#0; &#99999999;");
    assert_eq!(parser.strip_html("&amp;#52;"), "&#52;");
  }

  #[test]
  fn reads_station_from_full_page() {
    assert_eq!(parser().parse_html(REPORT_PAGE).unwrap(), 47);
  }

  #[test]
  fn same_document_same_reading() {
    let parser = parser();
    let first = parser.parse_html(REPORT_PAGE).unwrap();
    for _ in 0..3 {
      assert_eq!(parser.parse_html(REPORT_PAGE).unwrap(), first);
    }
  }
}
