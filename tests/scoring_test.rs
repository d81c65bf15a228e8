use rs_goose::cleaner::{DefaultDocumentCleaner, DocumentCleaner};
use rs_goose::extractor::ContentScorer;
use rs_goose::link_density::is_high_link_density;
use rs_goose::text::StopWords;
use rs_goose::dom::{self, Document};

fn cleaned(html: &str) -> Document {
    let doc = dom::parse(html);
    DefaultDocumentCleaner.clean(&doc);
    doc
}

#[test]
fn no_candidates_means_no_top_node() {
    let doc = cleaned("<html><body><div><a href='/'>Home</a></div><p>Hi.</p></body></html>");

    let selection = ContentScorer::new(&StopWords::english()).select_top_node(&doc);

    assert!(selection.top_node.is_none());
}

#[test]
fn prose_container_beats_link_list() {
    let doc = cleaned(
        r#"<html><body>
        <div id="links"><p><a href="/1">One of the links</a> <a href="/2">and another of them</a></p></div>
        <div id="story">
          <p>The storm that hit the coast on Sunday was the worst of the year, and many of the roads are still closed.</p>
          <p>Crews have been out since the early hours, and they say that it could take a week to clear all of them.</p>
        </div></body></html>"#,
    );

    let selection = ContentScorer::new(&StopWords::english()).select_top_node(&doc);

    let top = selection.top_node.expect("top node");
    let story = dom::select_all(&doc, "#story")[0];
    assert_eq!(top, story.id);
    assert!(selection.scores.score(&story.id) > 0);
}

#[test]
fn text_only_divs_become_scoreable_paragraphs() {
    let doc = cleaned(
        r#"<html><body><div id="wrap">
        <div>The river rose by more than a metre during the night and some of the houses near it were flooded.</div>
        <div>People who live in the area have been told to move their cars to the higher streets in the town.</div>
        </div></body></html>"#,
    );

    assert_eq!(dom::select_all(&doc, "#wrap p").len(), 2);

    let selection = ContentScorer::new(&StopWords::english()).select_top_node(&doc);
    assert_eq!(selection.top_node, Some(dom::select_all(&doc, "#wrap")[0].id));
}

#[test]
fn cleaning_twice_changes_nothing() {
    let html = r#"<html><body><div id="footer">x</div><div>Loose text in a div.</div>
        <div><a href="/a">link</a> trailing words after it <p>block</p></div></body></html>"#;
    let once = cleaned(html);
    let first = once.select("body").html().to_string();

    DefaultDocumentCleaner.clean(&once);

    assert_eq!(once.select("body").html().to_string(), first);
}

#[test]
fn link_heavy_paragraph_is_high_density() {
    let doc = dom::parse(
        r#"<div id="nav"><a href="/a">World news</a> <a href="/b">Sport news</a> today</div>
           <div id="prose">A long sentence with just <a href="/x">one</a> link inside it.</div>"#,
    );

    assert!(is_high_link_density(&dom::select_all(&doc, "#nav")[0]));
    assert!(!is_high_link_density(&dom::select_all(&doc, "#prose")[0]));
}
