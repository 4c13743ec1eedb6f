use ui_markdown::{markdown, to_html};

// Delimiters

#[test]
fn strong_in_sentence() {
    assert_eq!(
        to_html("Press **Save** to continue"),
        "Press <strong class=\"ui-markdown--strong\">Save</strong> to continue"
    );
}

#[test]
fn strong_does_not_nest_stars() {
    // Inner star blocks strong; emphasis picks up what it can.
    let result = to_html("**a *b* c**");
    assert!(!result.contains("ui-markdown--strong"), "{result}");
}

#[test]
fn emphasis_does_not_span_lines() {
    assert_eq!(to_html("*a\nb*"), "*a<br />b*");
}

#[test]
fn underline_multiple() {
    assert_eq!(
        to_html("_one_ and _two_"),
        "<span class=\"ui-markdown--underline\">one</span> and \
         <span class=\"ui-markdown--underline\">two</span>"
    );
}

#[test]
fn italic_unmatched() {
    assert_eq!(to_html("~ 5 minutes"), "~ 5 minutes");
}

#[test]
fn strong_inside_underline_is_left_alone() {
    // Single-level matching only: the outer underline still wraps.
    assert_eq!(
        to_html("_**x**_"),
        "<span class=\"ui-markdown--underline\"><strong class=\"ui-markdown--strong\">x</strong></span>"
    );
}

#[test]
fn escaped_delimiters_light() {
    assert_eq!(to_html("\\_a\\_"), "\\_a\\_");
}

#[test]
fn escaped_delimiters_full() {
    assert_eq!(markdown("\\_a\\_ and \\~b\\~", false), "<p class=\"ui-p\">_a_ and ~b~</p>");
}

#[test]
fn escaped_backslash_before_delimiter() {
    assert_eq!(
        markdown("\\\\*a*", false),
        "<p class=\"ui-p\">\\<span class=\"ui-markdown--emphasis\">a</span></p>"
    );
}

#[test]
fn emphasis_does_not_straddle_link() {
    assert_eq!(
        to_html("*a [b*](/c)"),
        "*a <a class=\"ui-link\" href=\"/c\">b*</a>"
    );
}

#[test]
fn strong_around_link() {
    assert_eq!(
        to_html("**[a](/a_b)**"),
        "<strong class=\"ui-markdown--strong\"><a class=\"ui-link\" href=\"/a_b\">a</a></strong>"
    );
}

// Inline code

#[test]
fn inline_code() {
    assert_eq!(to_html("run `ls -la`"), "run <code>ls -la</code>");
}

#[test]
fn inline_code_escapes_markup() {
    assert_eq!(to_html("`<b>`"), "<code>&lt;b&gt;</code>");
}

#[test]
fn empty_backticks_stay_literal() {
    assert_eq!(to_html("``"), "``");
}

// Links

#[test]
fn link_basic() {
    assert_eq!(to_html("[Home](/)"), "<a class=\"ui-link\" href=\"/\">Home</a>");
}

#[test]
fn link_with_title() {
    assert_eq!(
        to_html("[Docs](https://example.com/docs|Read the docs)"),
        "<a class=\"ui-link\" href=\"https://example.com/docs\" title=\"Read the docs\">Docs</a>"
    );
}

#[test]
fn link_rel_without_title() {
    assert_eq!(
        to_html("[x](/x||nofollow)"),
        "<a class=\"ui-link\" href=\"/x\" rel=\"nofollow\">x</a>"
    );
}

#[test]
fn link_target_after_rel() {
    let result = to_html("[Test](/test|Title|no referer|_blank) ");
    assert!(result.ends_with("rel=\"no referer\" target=\"_blank\">Test</a>"), "{result}");
}

#[test]
fn link_label_with_strong() {
    assert_eq!(
        to_html("[**Buy**](/shop)"),
        "<a class=\"ui-link\" href=\"/shop\"><strong class=\"ui-markdown--strong\">Buy</strong></a>"
    );
}

#[test]
fn link_url_with_underscores_and_tildes() {
    assert_eq!(
        to_html("[file](/my_file_name~1)"),
        "<a class=\"ui-link\" href=\"/my_file_name~1\">file</a>"
    );
}

#[test]
fn link_url_with_space_is_literal() {
    assert_eq!(to_html("[a](b c)"), "[a](b c)");
}

#[test]
fn link_cannot_inject_attributes() {
    let result = to_html("[x](/\"onmouseover=\"alert(1)|t)");
    assert!(!result.contains("\"onmouseover"), "{result}");
    assert!(result.contains("&quot;onmouseover=&quot;"), "{result}");
}

#[test]
fn link_with_script_scheme_stays_text() {
    assert_eq!(to_html("[x](javascript:alert(1))"), "[x](javascript:alert(1))");
    let result = to_html("[x](JavaScript:alert`1`)");
    assert!(!result.contains("href"), "{result}");
}

#[test]
fn two_links_on_one_line() {
    assert_eq!(
        to_html("[a](/a) or [b](/b)"),
        "<a class=\"ui-link\" href=\"/a\">a</a> or <a class=\"ui-link\" href=\"/b\">b</a>"
    );
}

// Images are a full-mode construct

#[test]
fn image_light_becomes_link() {
    assert_eq!(to_html("![a](/a.png)"), "!<a class=\"ui-link\" href=\"/a.png\">a</a>");
}

#[test]
fn image_full() {
    assert_eq!(
        markdown("![a \"b\"](/a.png)", false),
        "<img class=\"ui-image\" src=\"/a.png\" alt=\"a &quot;b&quot;\" />"
    );
}
