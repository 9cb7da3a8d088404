use mdpage_config::{RenderSettings, TitleMode, TocSettings};
use mdpage_outline::{
    build_forest, compute_numbering, heading_anchor, project_toc, restructure, Block, BlockId,
    BlockTag, BodyNode, Numbering, SectionForest, TocEntry, TocItem, TocProjection,
};

use crate::blocks::markdown_blocks;
use crate::sanitize::{escape_attr, escape_link, escape_text};

/// Style assets inlined into the page head, loaded once per run and shared
/// read-only across conversions.
#[derive(Clone, Debug, Default)]
pub struct StyleAssets {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl StyleAssets {
    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }
}

/// Convert one markdown document into a standalone HTML page.
///
/// The whole derivation chain runs here, in memory and in order: translate
/// to blocks, resolve the title, number the headings, build the section
/// forest once, then project it into whatever the settings ask for.
pub fn render_page(markdown: &str, settings: &RenderSettings, styles: &StyleAssets) -> String {
    let mut blocks = markdown_blocks(markdown);

    let title = blocks
        .first()
        .map(|block| block.text.clone())
        .unwrap_or_default();
    if settings.title == TitleMode::Remove && !blocks.is_empty() {
        blocks.remove(0);
    }

    let numbering = compute_numbering(&blocks);
    let forest = build_forest(&blocks, numbering.min_level());

    let mut out = String::with_capacity(markdown.len() * 2);
    out.push_str("<!DOCTYPE html>\n<html>\n");
    write_head(&mut out, &title, styles);
    out.push_str("<body>\n");

    if settings.header_wrapper {
        out.push_str("<div id=\"header\"><span>");
        escape_text(&mut out, &title);
        out.push_str("</span></div>\n<div id=\"content\">\n");
    }

    if let Some(toc) = &settings.toc {
        let projection = TocProjection {
            depth: toc.depth,
            numbered: toc.numbered,
            linked: settings.heading_links,
        };
        let tree = project_toc(&forest, &blocks, &numbering, &projection);
        write_toc(&mut out, toc, &tree.items);
    }

    if settings.semantic_output {
        write_semantic_body(&mut out, &forest, &blocks, &numbering, settings);
    } else {
        for (id, block) in blocks.iter().enumerate() {
            write_block(&mut out, block, id, &numbering, settings);
        }
    }

    if settings.header_wrapper {
        out.push_str("</div>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn write_head(out: &mut String, title: &str, styles: &StyleAssets) {
    out.push_str("<head>\n<meta charset=\"UTF-8\">\n<title>");
    escape_text(out, title);
    out.push_str("</title>\n");

    for css in &styles.css {
        out.push_str("<style>\n");
        push_raw_asset(out, css);
        out.push_str("</style>\n");
    }
    for js in &styles.js {
        out.push_str("<script>\n");
        push_raw_asset(out, js);
        out.push_str("</script>\n");
    }

    out.push_str("</head>\n");
}

fn push_raw_asset(out: &mut String, asset: &str) {
    out.push_str(asset);
    if !asset.ends_with('\n') {
        out.push('\n');
    }
}

fn write_toc(out: &mut String, settings: &TocSettings, items: &[TocItem]) {
    out.push_str("<div id=\"toc\">\n<h1>");
    escape_text(out, &settings.title);
    out.push_str("</h1>\n");
    if !items.is_empty() {
        write_toc_list(out, items);
    }
    out.push_str("</div>\n");
}

fn write_toc_list(out: &mut String, items: &[TocItem]) {
    out.push_str("<ol>\n");
    write_toc_items(out, items);
    out.push_str("</ol>\n");
}

fn write_toc_items(out: &mut String, items: &[TocItem]) {
    for item in items {
        match &item.entry {
            Some(entry) => {
                out.push_str("<li>");
                write_toc_entry(out, entry);
                if !item.children.is_empty() {
                    out.push('\n');
                    write_toc_list(out, &item.children);
                }
                out.push_str("</li>\n");
            }
            // A placeholder hosts its descendants but renders no item of
            // its own: splice them into the surrounding list.
            None => write_toc_items(out, &item.children),
        }
    }
}

fn write_toc_entry(out: &mut String, entry: &TocEntry) {
    match &entry.anchor {
        Some(anchor) => {
            out.push_str("<a href=\"#");
            escape_link(out, anchor);
            out.push_str("\">");
            write_entry_text(out, entry);
            out.push_str("</a>");
        }
        None => write_entry_text(out, entry),
    }
}

fn write_entry_text(out: &mut String, entry: &TocEntry) {
    if let Some(number) = &entry.number {
        escape_text(out, number);
        out.push(' ');
    }
    escape_text(out, &entry.text);
}

fn write_semantic_body(
    out: &mut String,
    forest: &SectionForest,
    blocks: &[Block],
    numbering: &Numbering,
    settings: &RenderSettings,
) {
    for node in restructure(forest) {
        write_body_node(out, &node, blocks, numbering, settings);
    }
}

fn write_body_node(
    out: &mut String,
    node: &BodyNode,
    blocks: &[Block],
    numbering: &Numbering,
    settings: &RenderSettings,
) {
    match node {
        BodyNode::Block(id) => write_block(out, &blocks[*id], *id, numbering, settings),
        BodyNode::Section { heading, children } => {
            out.push_str("<section>\n");
            if let Some(id) = heading {
                write_block(out, &blocks[*id], *id, numbering, settings);
            }
            for child in children {
                write_body_node(out, child, blocks, numbering, settings);
            }
            out.push_str("</section>\n");
        }
    }
}

fn write_block(
    out: &mut String,
    block: &Block,
    id: BlockId,
    numbering: &Numbering,
    settings: &RenderSettings,
) {
    match block.tag {
        BlockTag::Heading(level) => write_heading(out, block, level, id, numbering, settings),
        BlockTag::Other => out.push_str(&block.html),
    }
}

fn write_heading(
    out: &mut String,
    block: &Block,
    level: u8,
    id: BlockId,
    numbering: &Numbering,
    settings: &RenderSettings,
) {
    let label = numbering.label_for(id).unwrap_or_default();

    out.push_str("<h");
    out.push_str(&level.to_string());
    if settings.heading_links {
        out.push_str(" id=\"");
        escape_attr(out, &heading_anchor(label, &block.text));
        out.push('"');
    }
    out.push('>');
    if settings.heading_numbering {
        escape_text(out, label);
        out.push(' ');
    }
    out.push_str(&block.html);
    out.push_str("</h");
    out.push_str(&level.to_string());
    out.push_str(">\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpage_config::TocSettings;

    fn settings() -> RenderSettings {
        RenderSettings::default()
    }

    fn toc_settings(depth: u8) -> RenderSettings {
        RenderSettings {
            toc: Some(TocSettings::with_depth(depth)),
            ..RenderSettings::default()
        }
    }

    #[test]
    fn renders_a_minimal_page() {
        let page = render_page("# Hello\n\nWorld.\n", &settings(), &StyleAssets::default());
        assert!(page.starts_with("<!DOCTYPE html>\n<html>\n"));
        assert!(page.contains("<title>Hello</title>"));
        assert!(page.contains("<h1>Hello</h1>"));
        assert!(page.contains("<p>World.</p>"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn title_comes_from_the_first_block_even_when_removed() {
        let config = RenderSettings {
            title: TitleMode::Remove,
            ..settings()
        };
        let page = render_page("# Front Page\n\nBody.\n", &config, &StyleAssets::default());
        assert!(page.contains("<title>Front Page</title>"));
        assert!(!page.contains("<h1>Front Page</h1>"));
    }

    #[test]
    fn heading_links_add_stable_ids() {
        let config = RenderSettings {
            heading_links: true,
            ..settings()
        };
        let page = render_page("# Intro\n\n## Scope & Goals\n", &config, &StyleAssets::default());
        assert!(page.contains("<h1 id=\"1-Intro\">Intro</h1>"));
        assert!(page.contains("<h2 id=\"1-1-Scope-Goals\">Scope &amp; Goals</h2>"));
    }

    #[test]
    fn heading_numbering_prefixes_labels() {
        let config = RenderSettings {
            heading_numbering: true,
            ..settings()
        };
        let page = render_page("# A\n\n## B\n\n## C\n", &config, &StyleAssets::default());
        assert!(page.contains("<h1>1. A</h1>"));
        assert!(page.contains("<h2>1.1 B</h2>"));
        assert!(page.contains("<h2>1.2 C</h2>"));
    }

    #[test]
    fn toc_mirrors_the_section_tree() {
        let mut config = toc_settings(2);
        config.heading_links = true;
        let page = render_page(
            "# A\n\nx\n\n## B\n\ny\n\n## C\n",
            &config,
            &StyleAssets::default(),
        );

        let toc_start = page.find("<div id=\"toc\">").expect("toc rendered");
        let toc = &page[toc_start..page.find("</div>").expect("toc closed")];
        assert!(toc.contains("<h1>Table of Contents</h1>"));
        assert!(toc.contains("<li><a href=\"#1-A\">A</a>"));
        assert!(toc.contains("<li><a href=\"#1-1-B\">B</a></li>"));
        assert!(toc.contains("<li><a href=\"#1-2-C\">C</a></li>"));
        assert_eq!(toc.matches("<ol>").count(), 2, "one list per tree level");
    }

    #[test]
    fn toc_depth_bound_hides_deep_headings() {
        let page = render_page(
            "# A\n\n## B\n\n### deep\n\n## C\n",
            &toc_settings(2),
            &StyleAssets::default(),
        );
        let toc_start = page.find("<div id=\"toc\">").expect("toc rendered");
        let toc = &page[toc_start..page.find("</div>").expect("toc closed")];
        assert!(!toc.contains("deep"));
        assert!(page.contains("<h3>deep</h3>"), "body keeps the heading");
    }

    #[test]
    fn skipped_levels_produce_no_blank_toc_entries() {
        let mut config = toc_settings(4);
        config.heading_links = true;
        let page = render_page("# Top\n\n### Deep\n", &config, &StyleAssets::default());

        let toc_start = page.find("<div id=\"toc\">").expect("toc rendered");
        let toc = &page[toc_start..page.find("</div>").expect("toc closed")];
        // The skipped level shows up as a zero in the label, not as a blank
        // list entry.
        assert!(toc.contains("<li><a href=\"#1-0-1-Deep\">Deep</a></li>"));
        assert_eq!(
            toc.matches("<ol>").count(),
            2,
            "the placeholder splices instead of nesting an extra list"
        );
        assert!(!toc.contains("<li>\n"), "no empty intermediate item");
    }

    #[test]
    fn toc_numbering_prefixes_entries() {
        let mut config = toc_settings(4);
        if let Some(toc) = &mut config.toc {
            toc.numbered = true;
        }
        let page = render_page("# A\n\n## B\n", &config, &StyleAssets::default());
        assert!(page.contains("<li>1. A"));
        assert!(page.contains("<li>1.1 B</li>"));
    }

    #[test]
    fn semantic_output_nests_section_containers() {
        let config = RenderSettings {
            semantic_output: true,
            ..settings()
        };
        let page = render_page(
            "intro\n\n# A\n\nx\n\n## B\n\ny\n",
            &config,
            &StyleAssets::default(),
        );

        let body_start = page.find("<body>").expect("body rendered");
        let body = &page[body_start..];
        assert!(
            body.find("<p>intro</p>").expect("preamble kept")
                < body.find("<section>").expect("section wrapper"),
            "preamble stays outside any section"
        );
        assert_eq!(body.matches("<section>").count(), 2);
        assert_eq!(body.matches("</section>").count(), 2);
        let inner = &body[body.find("<h2>").expect("nested heading")..];
        assert!(inner.starts_with("<h2>B</h2>"));
    }

    #[test]
    fn header_wrapper_adds_title_and_content_containers() {
        let config = RenderSettings {
            header_wrapper: true,
            ..settings()
        };
        let page = render_page("# Front\n\nBody.\n", &config, &StyleAssets::default());
        assert!(page.contains("<div id=\"header\"><span>Front</span></div>"));
        assert!(page.contains("<div id=\"content\">"));
    }

    #[test]
    fn styles_and_scripts_are_inlined_in_order() {
        let styles = StyleAssets {
            css: vec!["body { margin: 0; }".to_string()],
            js: vec!["console.log(1);".to_string()],
        };
        let page = render_page("# T\n", &settings(), &styles);
        let style_at = page.find("<style>").expect("style inlined");
        let script_at = page.find("<script>").expect("script inlined");
        assert!(style_at < script_at, "css precedes js");
        assert!(page.contains("body { margin: 0; }"));
        assert!(page.contains("console.log(1);"));
    }

    #[test]
    fn empty_documents_render_an_untitled_page() {
        let page = render_page("", &toc_settings(4), &StyleAssets::default());
        assert!(page.contains("<title></title>"));
        assert!(page.contains("<div id=\"toc\">"));
        assert!(!page.contains("<ol>"));
    }
}
