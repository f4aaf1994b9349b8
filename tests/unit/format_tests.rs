/*!
 * Tests for the format adapter
 */

use doctran::format::DocumentFormat;

#[test]
fn test_from_str_withSupportedTokens_shouldParse() {
    assert_eq!("pdf".parse::<DocumentFormat>().unwrap(), DocumentFormat::Pdf);
    assert_eq!("docx".parse::<DocumentFormat>().unwrap(), DocumentFormat::Docx);
    assert_eq!("PDF".parse::<DocumentFormat>().unwrap(), DocumentFormat::Pdf);
    assert_eq!(" Docx ".parse::<DocumentFormat>().unwrap(), DocumentFormat::Docx);
}

#[test]
fn test_from_str_withUnsupportedToken_shouldRejectWithFormatError() {
    for token in ["doc", "odt", "txt", "", "pdfx"] {
        let result = token.parse::<DocumentFormat>();
        assert!(result.is_err(), "token '{}' should be rejected", token);
    }
}

#[test]
fn test_mime_type_shouldFollowProducedFormat() {
    assert_eq!(DocumentFormat::Pdf.mime_type(), "application/pdf");
    assert_eq!(
        DocumentFormat::Docx.mime_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
}

#[test]
fn test_extension_shouldMatchFormatToken() {
    assert_eq!(DocumentFormat::Pdf.extension(), "pdf");
    assert_eq!(DocumentFormat::Docx.extension(), "docx");
}
