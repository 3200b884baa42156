//! Heading-scoped section walking.
//!
//! A section starts after a heading and runs through the following sibling
//! elements until the next heading of equal or higher rank. Newer MediaWiki
//! markup wraps each heading in `<div class="mw-heading">`; the wrapper is
//! then the sibling that matters, so the walk starts from it and treats
//! other wrappers as headings.

use scraper::ElementRef;

const HEADING_WRAPPER_CLASS: &str = "mw-heading";

/// Traversal the section walk needs from a document node.
pub trait SectionNode: Copy {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn parent_element(&self) -> Option<Self>;
    fn next_element_sibling(&self) -> Option<Self>;
    fn first_child_element(&self) -> Option<Self>;
}

impl<'a> SectionNode for ElementRef<'a> {
    fn tag(&self) -> &str {
        self.value().name()
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }

    fn first_child_element(&self) -> Option<Self> {
        self.children().find_map(ElementRef::wrap)
    }
}

fn tag_rank(tag: &str) -> Option<u8> {
    match tag {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

fn is_heading_wrapper<N: SectionNode>(node: N) -> bool {
    node.tag() == "div" && node.has_class(HEADING_WRAPPER_CLASS)
}

/// Rank of a heading (2 for `h2` .. 4 for `h4`), looking through a heading
/// wrapper to the heading inside it. `None` for anything else.
pub fn heading_rank<N: SectionNode>(node: N) -> Option<u8> {
    if let Some(rank) = tag_rank(node.tag()) {
        return Some(rank);
    }
    if is_heading_wrapper(node) {
        return node.first_child_element().and_then(|h| tag_rank(h.tag()));
    }
    None
}

/// Sibling elements belonging to one heading's section.
pub struct SectionWalk<N: SectionNode> {
    next: Option<N>,
    rank: u8,
}

impl<N: SectionNode> SectionWalk<N> {
    /// Start a walk below `heading`. Returns `None` when `heading` is not
    /// an `h2`..`h4`.
    pub fn after(heading: N) -> Option<Self> {
        let rank = tag_rank(heading.tag())?;
        let anchor = heading
            .parent_element()
            .filter(|p| is_heading_wrapper(*p))
            .unwrap_or(heading);
        Some(Self {
            next: anchor.next_element_sibling(),
            rank,
        })
    }
}

impl<N: SectionNode> Iterator for SectionWalk<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let current = self.next.take()?;
        if heading_rank(current).is_some_and(|r| r <= self.rank) {
            return None;
        }
        self.next = current.next_element_sibling();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn walk_tags(html: &str, heading_id: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        let sel = Selector::parse(&format!("#{heading_id}")).unwrap();
        let heading = doc.select(&sel).next().unwrap();
        SectionWalk::after(heading)
            .unwrap()
            .map(|el| match el.value().attr("id") {
                Some(id) => format!("{}#{}", el.tag(), id),
                None => el.tag().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_walk_stops_at_equal_rank() {
        let html = r#"<body>
            <h2 id="a">旅游</h2><p>intro</p><ul id="l1"><li>x</li></ul>
            <h2 id="b">历史</h2><ul id="l2"></ul>
        </body>"#;
        assert_eq!(walk_tags(html, "a"), vec!["p", "ul#l1"]);
    }

    #[test]
    fn test_walk_continues_through_lower_rank() {
        let html = r#"<body>
            <h2 id="a">旅游</h2><ul id="l1"></ul>
            <h3 id="sub">公园</h3><ul id="l2"></ul>
            <h2 id="b">交通</h2>
        </body>"#;
        assert_eq!(walk_tags(html, "a"), vec!["ul#l1", "h3#sub", "ul#l2"]);
        assert_eq!(walk_tags(html, "sub"), vec!["ul#l2"]);
    }

    #[test]
    fn test_walk_stops_at_higher_rank() {
        let html = r#"<body>
            <h4 id="a">寺庙</h4><ol id="l1"></ol>
            <h3 id="b">博物馆</h3><ul></ul>
        </body>"#;
        assert_eq!(walk_tags(html, "a"), vec!["ol#l1"]);
    }

    #[test]
    fn test_walk_from_wrapped_heading() {
        let html = r#"<body>
            <div class="mw-heading mw-heading2"><h2 id="a">旅游景点</h2><span>编辑</span></div>
            <ul id="l1"><li>x</li></ul>
            <div class="mw-heading mw-heading3"><h3 id="sub">古迹</h3></div>
            <ul id="l2"></ul>
            <div class="mw-heading mw-heading2"><h2 id="b">参考文献</h2></div>
            <ul id="l3"></ul>
        </body>"#;
        assert_eq!(walk_tags(html, "a"), vec!["ul#l1", "div", "ul#l2"]);
        assert_eq!(walk_tags(html, "sub"), vec!["ul#l2"]);
    }

    #[test]
    fn test_non_heading_has_no_walk() {
        let doc = Html::parse_document("<body><p id='p'>x</p></body>");
        let p = doc.select(&Selector::parse("#p").unwrap()).next().unwrap();
        assert!(SectionWalk::after(p).is_none());
        assert_eq!(heading_rank(p), None);
    }
}
