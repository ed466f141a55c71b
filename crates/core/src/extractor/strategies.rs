use scraper::{ElementRef, Html, Selector};

/// Heading the structural strategy anchors on.
pub const HEADING_PHRASE: &str = "Today's Gold Rate in Coimbatore";

/// Purity label the semantic strategy requires.
pub const CATEGORY_LABEL: &str = "(22K)";

/// Unit word the semantic strategy requires.
pub const UNIT_WORD: &str = "gram";

/// Presentational class names the source page has used for price cells.
pub const PRICE_CLASS_SELECTOR: &str = ".white-space-nowrap, .whitespace-nowrap";

/// Plausible band for a 22K per-gram price in INR. The loosest strategy
/// accepts any rupee amount inside this band.
pub const PLAUSIBLE_BAND: std::ops::RangeInclusive<u64> = 9000..=9999;

/// One fallback heuristic of the extraction cascade.
///
/// Each strategy is a pure function from parsed document to optional price,
/// tried in priority order until one succeeds. Later strategies are looser
/// than earlier ones: they accept a higher false-positive risk only when
/// the stricter ones have already failed. The source markup is not
/// contractually stable, so all of this is explicitly best-effort.
pub trait ExtractionStrategy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Attempt to pull a price out of the document.
    fn extract(&self, doc: &Html) -> Option<f64>;
}

/// The cascade in priority order: structural, semantic, class-based, range.
pub fn default_strategies() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(HeadingStrategy),
        Box::new(LabelStrategy),
        Box::new(ClassStrategy),
        Box::new(RangeStrategy),
    ]
}

/// First rupee amount in a piece of text: a `₹` marker, optional
/// whitespace, then a digit run with thousands separators stripped.
pub fn rupee_amount(text: &str) -> Option<f64> {
    rupee_amounts(text).next()
}

/// All rupee amounts in a piece of text, in order of appearance.
fn rupee_amounts(text: &str) -> impl Iterator<Item = f64> + '_ {
    text.match_indices('₹').filter_map(move |(idx, marker)| {
        let rest = text[idx + marker.len()..].trim_start();
        let run: String = rest
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .collect();
        let digits: String = run.chars().filter(char::is_ascii_digit).collect();
        digits.parse::<f64>().ok()
    })
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Strategy A (structural): locate the heading carrying the fixed phrase,
/// then take the first `span` under its enclosing container whose text
/// holds a rupee amount.
pub struct HeadingStrategy;

impl ExtractionStrategy for HeadingStrategy {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn extract(&self, doc: &Html) -> Option<f64> {
        let heading_sel = Selector::parse("h2").ok()?;
        let span_sel = Selector::parse("span").ok()?;

        for heading in doc.select(&heading_sel) {
            if !element_text(&heading).contains(HEADING_PHRASE) {
                continue;
            }
            let container = heading.parent().and_then(ElementRef::wrap)?;
            for span in container.select(&span_sel) {
                if let Some(price) = rupee_amount(&element_text(&span)) {
                    return Some(price);
                }
            }
        }
        None
    }
}

/// Strategy B (semantic): any element whose text simultaneously carries the
/// currency marker, the purity label, and the unit word. The first rupee
/// amount in that text wins.
pub struct LabelStrategy;

impl ExtractionStrategy for LabelStrategy {
    fn name(&self) -> &'static str {
        "label"
    }

    fn extract(&self, doc: &Html) -> Option<f64> {
        let all = Selector::parse("*").ok()?;
        doc.select(&all).find_map(|el| {
            let text = element_text(&el);
            if text.contains('₹') && text.contains(CATEGORY_LABEL) && text.contains(UNIT_WORD) {
                rupee_amount(&text)
            } else {
                None
            }
        })
    }
}

/// Strategy C (class-based): elements with the known presentational class
/// names, first rupee amount wins.
pub struct ClassStrategy;

impl ExtractionStrategy for ClassStrategy {
    fn name(&self) -> &'static str {
        "class"
    }

    fn extract(&self, doc: &Html) -> Option<f64> {
        let sel = Selector::parse(PRICE_CLASS_SELECTOR).ok()?;
        doc.select(&sel).find_map(|el| rupee_amount(&element_text(&el)))
    }
}

/// Strategy D (range heuristic): any rupee amount anywhere in the document
/// that falls inside the plausible band. The loosest fallback of all.
pub struct RangeStrategy;

impl ExtractionStrategy for RangeStrategy {
    fn name(&self) -> &'static str {
        "range"
    }

    fn extract(&self, doc: &Html) -> Option<f64> {
        let all = Selector::parse("*").ok()?;
        doc.select(&all).find_map(|el| {
            let text = element_text(&el);
            let found = rupee_amounts(&text).find(|p| PLAUSIBLE_BAND.contains(&(*p as u64)));
            found
        })
    }
}
