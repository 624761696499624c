//! Response composer — one category as speech markup and card text.

use lunchline_core::menu::Category;

/// Asked after every category but the last.
pub const MORE_PROMPT: &str = "Want more menu items?";

/// A rendered category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Paragraph markup, without the enclosing `<speak>` element
    pub speech: String,
    /// Plain newline-separated text for a visual card
    pub card_text: String,
    /// Whether the conversation continues after this category
    pub continues: bool,
}

/// Render a category's items for `date_label`.
///
/// Each line becomes its own `<p>` so speech pauses between items. An empty
/// item list renders a "none today" line instead.
///
/// Items are expected to be parser-sanitized labels and are used as given in
/// the card text. The speech side only guards the markup.
pub fn render(category: Category, items: &[String], date_label: &str) -> Rendered {
    let continues = !category.is_last();

    let header = if items.is_empty() {
        format!("For {date_label}, there are no {category} on the menu")
    } else {
        format!("For {date_label}, {category}")
    };

    let mut lines = Vec::with_capacity(items.len() + 2);
    lines.push(header);
    lines.extend(items.iter().cloned());
    if continues {
        lines.push(MORE_PROMPT.to_string());
    }

    let speech = lines
        .iter()
        .map(|line| format!("<p>{}</p>", escape_markup(line)))
        .collect::<Vec<_>>()
        .join(" ");
    let card_text = lines.join("\n");

    Rendered {
        speech,
        card_text,
        continues,
    }
}

/// Wrap loose sentences in paragraph markup.
pub fn paragraphs<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
    lines
        .into_iter()
        .map(|line| format!("<p>{}</p>", escape_markup(line)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep speech markup well-formed. A stray `&` is read out as "and".
fn escape_markup(text: &str) -> String {
    text.replace('&', "and").replace(['<', '>'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "Monday September 8 2025";

    fn items(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn entrees_render_with_prompt() {
        let r = render(Category::Entrees, &items(&["Tacos", "Rice Bowl"]), DATE);
        assert_eq!(
            r.speech,
            "<p>For Monday September 8 2025, Entrees</p> <p>Tacos</p> <p>Rice Bowl</p> <p>Want more menu items?</p>"
        );
        assert_eq!(
            r.card_text,
            "For Monday September 8 2025, Entrees\nTacos\nRice Bowl\nWant more menu items?"
        );
        assert!(r.continues);
    }

    #[test]
    fn dessert_omits_prompt_and_ends() {
        let r = render(Category::Dessert, &items(&["Brownie"]), DATE);
        assert!(!r.continues);
        assert!(!r.speech.contains(MORE_PROMPT));
        assert!(!r.card_text.contains(MORE_PROMPT));
        assert!(r.speech.contains("Fruit and Dessert"));
    }

    #[test]
    fn empty_category_says_none() {
        let r = render(Category::Soups, &[], DATE);
        assert!(r.speech.contains("there are no Soups on the menu"));
        assert!(r.continues);
    }

    #[test]
    fn markup_stays_well_formed() {
        let r = render(Category::Entrees, &items(&["Mac & Cheese", "Chips <large>"]), DATE);
        assert!(r.speech.contains("<p>Mac and Cheese</p>"));
        assert!(!r.speech.contains('&'));
        assert!(!r.speech.contains("<large>"));
    }

    #[test]
    fn sanitized_labels_pass_through_once() {
        let label = lunchline_menu::sanitize_label("Fish & Chips");
        let r = render(Category::Entrees, &[label], DATE);
        assert!(r.speech.contains("<p>Fish and Chips</p>"));
        assert!(r.card_text.contains("\nFish and Chips\n"));
        assert!(!r.card_text.contains('&'));
    }

    #[test]
    fn paragraphs_join_sentences() {
        assert_eq!(paragraphs(["One.", "Two."]), "<p>One.</p> <p>Two.</p>");
    }
}
