//! Coverage for the question resource and ordinal resolution.

use rstest::rstest;

use super::*;

#[test]
fn question_requires_a_title() {
    assert_eq!(
        Question::new("  ", "body").expect_err("must fail"),
        QuestionValidationError::EmptyTitle
    );
}

#[test]
fn question_requires_a_body() {
    assert_eq!(
        Question::new("title", "\n").expect_err("must fail"),
        QuestionValidationError::EmptyBody
    );
}

#[rstest]
#[case(0, 3, Some(0))]
#[case(2, 3, Some(2))]
#[case(-1, 3, Some(2))]
#[case(-2, 3, Some(1))]
#[case(-3, 3, Some(0))]
#[case(3, 3, None)]
#[case(-4, 3, None)]
#[case(0, 0, None)]
#[case(-1, 0, None)]
fn comment_index_resolution(
    #[case] raw: i64,
    #[case] len: usize,
    #[case] expected: Option<usize>,
) {
    assert_eq!(CommentIndex::new(raw).resolve(len), expected);
}

#[test]
fn comment_serialises_with_camel_case_keys() {
    let comment = Comment::new(
        crate::domain::DisplayName::new("Alice A.").expect("name"),
        "<span>Test comment 1</span>".to_owned(),
    );
    let value = serde_json::to_value(&comment).expect("serialise");
    assert_eq!(
        value.get("bodyMarkup").and_then(serde_json::Value::as_str),
        Some("<span>Test comment 1</span>")
    );
    assert_eq!(
        value.get("author").and_then(serde_json::Value::as_str),
        Some("Alice A.")
    );
}
