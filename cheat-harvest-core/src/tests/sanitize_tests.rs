use super::*;

fn balanced(s: &str) -> bool {
    count(s, '[') == count(s, ']')
}

#[test]
fn accents_folded_to_ascii() {
    assert_eq!(sanitize_name("Pokémon Sword", true), "Pokemon Sword");
}

#[test]
fn decorative_marks_removed() {
    assert_eq!(sanitize_name("★☆ Super Game ☆★", true), "Super Game");
    assert_eq!(sanitize_name("Mario Kart® 8 Deluxe", true), "Mario Kart 8 Deluxe");
}

#[test]
fn only_decorative_marks_gives_empty() {
    assert_eq!(sanitize_name("✦✦✦", true), "");
    assert_eq!(sanitize_name("✦ Hero ✦", false), "Hero");
}

#[test]
fn leading_non_letters_stripped() {
    assert_eq!(sanitize_name("999 Coins", true), "Coins");
    assert_eq!(sanitize_name("--Max HP", false), "Max HP");
    assert_eq!(sanitize_name("12345", true), "");
}

#[test]
fn folder_names_drop_brackets_and_punctuation() {
    assert_eq!(sanitize_name("Money [x99]", true), "Money x99");
    assert_eq!(sanitize_name("Hit.Points! (Max)", true), "HitPoints Max");
}

#[test]
fn hyphen_and_underscore_survive() {
    assert_eq!(sanitize_name("Max-Speed_2", true), "Max-Speed_2");
}

#[test]
fn file_names_keep_brackets() {
    assert_eq!(sanitize_name("Infinite HP [x2]", false), "Infinite HP [x2]");
}

#[test]
fn enclosing_brackets_lose_trailing_closer() {
    // The leading '[' goes with the non-letter prefix; the orphaned ']' follows it.
    assert_eq!(sanitize_name("[Infinite HP]", false), "Infinite HP");
}

#[test]
fn excess_trailing_closers_trimmed() {
    assert_eq!(sanitize_name("Money [x99]]", false), "Money [x99]");
    assert_eq!(sanitize_name("Money [x99]]]]", false), "Money [x99]");
}

#[test]
fn unmatched_closer_in_middle_removed() {
    assert_eq!(sanitize_name("Speed] Hack", false), "Speed Hack");
}

#[test]
fn opening_brackets_never_removed() {
    assert_eq!(sanitize_name("Jump [high [b]", false), "Jump [high [b]");
}

#[test]
fn bracket_balance_holds_for_matched_or_excess_closers() {
    let inputs = [
        "A [b] [c]",
        "A [b]]",
        "A ]b[ c]",
        "[[Moon Jump]]]",
        "Gold [x100]] Silver]",
        "No brackets",
        "]]]Leading",
    ];
    for input in inputs {
        let out = sanitize_name(input, false);
        assert!(balanced(&out), "{input:?} -> {out:?}");
    }
}

#[test]
fn sanitize_filename_replaces_reserved() {
    assert_eq!(sanitize_filename("Title: Sub/Part?"), "Title_ Sub_Part_");
    assert_eq!(sanitize_filename(" 0100ABCD00000000 "), "0100ABCD00000000");
}

#[test]
fn folder_name_or_uses_fallback_when_empty() {
    assert_eq!(folder_name_or("12345", "0100ABC"), "0100ABC");
    assert_eq!(folder_name_or("Zelda", "0100ABC"), "Zelda");
}

#[test]
fn line_breaks_and_tabs_become_spaces() {
    assert_eq!(sanitize_name("Infinite\nHealth", true), "Infinite Health");
    assert_eq!(sanitize_name("Moon\tJump\r\n", false), "Moon Jump");
    assert!(!sanitize_name("A\n\nB", true).contains('\n'));
}
