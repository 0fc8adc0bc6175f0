use cheat_harvest_core::{BuildId, Cheat, CheatSource, Title};

use super::*;

fn harvested(layout: &OutputLayout) -> HarvestedTitle {
    let mut title = Title::new("0100000000010000", "Tom&Jerry <Deluxe>");
    title.size_bytes = Some(5_368_709_120);
    title.publisher = Some("Acme \"Games\"".to_string());

    let mut with_cheats = Build::new(BuildId::new("ABCDEF0123456789"), "1.0.0");
    with_cheats.add_cheat(Cheat::new(
        "<script>alert(1)</script>",
        vec!["04000000 00112233 00000063".to_string()],
        CheatSource::PrimarySite,
    ));
    with_cheats.add_cheat(Cheat::new(
        "Max Money",
        vec!["08000000 00AABBCC 0098967F".to_string()],
        CheatSource::SecondaryApi,
    ));
    with_cheats.cheat_dir = Some(layout.build_dir(&title, &with_cheats.build_id));
    with_cheats.archive_path = Some(layout.archive_path(&title, &with_cheats.build_id));

    let empty = Build::new(BuildId::new("1122334455667788"), "1.1.0");

    HarvestedTitle {
        title,
        builds: vec![with_cheats, empty],
    }
}

#[test]
fn title_page_escapes_every_interpolated_value() {
    let layout = OutputLayout::new("out");
    let html = render_title_page(&harvested(&layout), &layout);

    assert!(html.contains("<h1>Tom&amp;Jerry &lt;Deluxe&gt;</h1>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("Acme &quot;Games&quot;"));
}

#[test]
fn title_page_lists_metadata_and_sources() {
    let layout = OutputLayout::new("out");
    let html = render_title_page(&harvested(&layout), &layout);

    assert!(html.contains("<strong>Game ID:</strong> 0100000000010000"));
    assert!(html.contains("<strong>Release Date:</strong> Unknown"));
    assert!(html.contains("<strong>Size:</strong> 5.00 GB"));
    assert!(html.contains("tinfoil.io, cheatslips.com"));
    assert!(html.contains("[Max Money]\n08000000 00AABBCC 0098967F"));
}

#[test]
fn builds_without_cheats_never_rendered() {
    let layout = OutputLayout::new("out");
    let h = harvested(&layout);
    let page = render_title_page(&h, &layout);
    let index = render_index(std::slice::from_ref(&h), &layout);

    for html in [&page, &index] {
        assert!(html.contains("ABCDEF0123456789"));
        assert!(!html.contains("1122334455667788"));
    }
}

#[test]
fn title_page_links_are_relative_and_encoded() {
    let layout = OutputLayout::new("out");
    let html = render_title_page(&harvested(&layout), &layout);

    assert!(html.contains("<a href=\"ABCDEF0123456789\">Cheat Directory</a>"));
    assert!(html.contains("href=\"TomJerry%20Deluxe%20-%20ABCDEF0123456789.zip\""));
}

#[test]
fn index_links_into_title_folders() {
    let layout = OutputLayout::new("out");
    let html = render_index(&[harvested(&layout)], &layout);

    assert!(html.contains("<a href=\"TomJerry%20Deluxe/index.html\">Tom&amp;Jerry &lt;Deluxe&gt;</a>"));
    assert!(html.contains(
        "href=\"TomJerry%20Deluxe/TomJerry%20Deluxe%20-%20ABCDEF0123456789.zip\""
    ));
    assert!(html.contains("<td>2</td>"));
    assert!(html.contains("'Game Title', 'Build ID', 'Version', 'Source'"));
}

#[test]
fn index_without_archive_says_so() {
    let layout = OutputLayout::new("out");
    let mut h = harvested(&layout);
    h.builds[0].archive_path = None;
    let html = render_index(&[h], &layout);
    assert!(html.contains("No Download"));
}

#[test]
fn pages_written_to_layout_paths() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    let h = harvested(&layout);

    let page = write_title_page(&h, &layout).unwrap();
    let index = write_index(std::slice::from_ref(&h), &layout).unwrap();
    assert_eq!(page, layout.title_index(&h.title));
    assert_eq!(index, layout.root_index());

    let text = std::fs::read_to_string(&page).unwrap();
    assert!(text.starts_with("<!DOCTYPE html>"));
    assert!(text.contains("$('#cheatsTable').DataTable"));
}

#[test]
fn relative_link_climbs_and_encodes() {
    assert_eq!(
        relative_link(Path::new("out/A"), Path::new("out/B b/c#d.zip")).as_deref(),
        Some("../B%20b/c%23d.zip")
    );
}

#[test]
fn human_sizes() {
    assert_eq!(human_size(512), "512 B");
    assert_eq!(human_size(1536), "1.50 KB");
    assert_eq!(human_size(3 * 1024 * 1024), "3.00 MB");
    assert_eq!(human_size(5 * 1024 * 1024 * 1024 * 1024 * 1024), "5120.00 TB");
}

#[test]
fn escape_html_covers_quotes() {
    assert_eq!(escape_html("a & 'b' \"c\""), "a &amp; &#39;b&#39; &quot;c&quot;");
}
