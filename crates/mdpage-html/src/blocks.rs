use mdpage_outline::Block;
use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Markdown extensions enabled at the translator boundary.
fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Translate markdown into the flat block sequence the outline engine
/// consumes: one block per top-level element, in document order.
///
/// Headings keep their inner inline markup (plus flattened text) so the
/// page renderer can rebuild the tag with ids and numbering labels; every
/// other element is rendered whole.
pub fn markdown_blocks(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Vec<Event<'_>> = Vec::new();
    let mut text = String::new();
    let mut heading: Option<u8> = None;
    let mut depth = 0usize;

    for event in Parser::new_ext(source, parser_options()) {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    heading = heading_level(&tag);
                }
                if depth > 0 || heading.is_none() {
                    pending.push(Event::Start(tag));
                }
                depth += 1;
            }
            Event::End(tag) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let level = heading.take();
                    if level.is_none() {
                        pending.push(Event::End(tag));
                    }
                    blocks.push(finish_block(level, &mut pending, &mut text));
                } else {
                    pending.push(Event::End(tag));
                }
            }
            event => {
                flatten_text(&event, &mut text);
                pending.push(event);
                if depth == 0 {
                    // Standalone top-level event: a rule or a raw HTML block.
                    blocks.push(finish_block(None, &mut pending, &mut text));
                }
            }
        }
    }

    blocks
}

fn finish_block(heading: Option<u8>, pending: &mut Vec<Event<'_>>, text: &mut String) -> Block {
    let mut rendered = String::new();
    html::push_html(&mut rendered, pending.drain(..));

    let flattened = collapse_whitespace(text);
    text.clear();

    match heading {
        Some(level) => Block::heading(level, rendered, flattened),
        None => Block::other(rendered, flattened),
    }
}

fn heading_level(tag: &Tag<'_>) -> Option<u8> {
    match tag {
        Tag::Heading(level, ..) => Some(*level as u8),
        _ => None,
    }
}

fn flatten_text(event: &Event<'_>, text: &mut String) {
    match event {
        Event::Text(value) | Event::Code(value) => text.push_str(value),
        Event::SoftBreak | Event::HardBreak => text.push(' '),
        Event::FootnoteReference(name) => text.push_str(name),
        _ => {}
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
