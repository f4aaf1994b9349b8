/*!
 * Tests for the shared structural document model
 */

use doctran::document_model::{Document, Page, Paragraph, Table};

fn two_page_document() -> Document {
    let mut first = Page::new(1);
    first.paragraphs.push(Paragraph::new("one"));
    first.paragraphs.push(Paragraph::new("two"));
    first.tables.push(Table::new(vec![
        vec![Some("a".to_string()), Some("b".to_string())],
        vec![Some("c".to_string()), None],
    ]));

    let mut second = Page::new(2);
    second.paragraphs.push(Paragraph::new("three"));

    Document {
        pages: vec![first, second],
    }
}

#[test]
fn test_paragraph_count_withMultiplePages_shouldSumAcrossPages() {
    let document = two_page_document();
    assert_eq!(document.paragraph_count(), 3);
}

#[test]
fn test_paragraph_is_blank_withWhitespaceText_shouldBeTrue() {
    assert!(Paragraph::new("   ").is_blank());
    assert!(Paragraph::new("").is_blank());
    assert!(!Paragraph::new("x").is_blank());
}

#[test]
fn test_structure_matches_withIdenticalShape_shouldBeTrue() {
    let document = two_page_document();
    let mut other = two_page_document();
    // Different text, same shape
    other.pages[0].paragraphs[0].text = "uno".to_string();
    other.pages[0].tables[0].rows[0][0] = Some("alfa".to_string());

    assert!(document.structure_matches(&other));
}

#[test]
fn test_structure_matches_withMissingParagraph_shouldBeFalse() {
    let document = two_page_document();
    let mut other = two_page_document();
    other.pages[1].paragraphs.pop();

    assert!(!document.structure_matches(&other));
}

#[test]
fn test_structure_matches_withDifferentTableShape_shouldBeFalse() {
    let document = two_page_document();
    let mut other = two_page_document();
    other.pages[0].tables[0].rows[1].push(Some("extra".to_string()));

    assert!(!document.structure_matches(&other));
}

#[test]
fn test_structure_matches_withDifferentPageCount_shouldBeFalse() {
    let document = two_page_document();
    let mut other = two_page_document();
    other.pages.pop();

    assert!(!document.structure_matches(&other));
}

#[test]
fn test_table_shape_matches_withRaggedRows_shouldCompareRowWise() {
    // Row widths need not be equal across the grid
    let ragged = Table::new(vec![
        vec![Some("a".to_string())],
        vec![Some("b".to_string()), Some("c".to_string())],
    ]);
    let same_shape = Table::new(vec![
        vec![Some("x".to_string())],
        vec![None, Some("z".to_string())],
    ]);
    let different = Table::new(vec![
        vec![Some("x".to_string()), Some("y".to_string())],
        vec![None, Some("z".to_string())],
    ]);

    assert!(ragged.shape_matches(&same_shape));
    assert!(!ragged.shape_matches(&different));
}
