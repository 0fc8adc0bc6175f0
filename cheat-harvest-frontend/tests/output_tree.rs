use cheat_harvest_core::*;
use cheat_harvest_frontend::*;

fn harvested() -> HarvestedTitle {
    let mut title = Title::new("01007EF00011E000", "The Legend of Zelda\u{2122}: Breath of the Wild");
    title.release_date = Some("2017-03-03".to_string());

    let mut v100 = Build::new(BuildId::new("ABCDEF0123456789AAAABBBBCCCCDDDD"), "1.0.0");
    let mut hp = Cheat::new(
        "Infinite Hearts",
        vec!["04000000 00112233 00000063".to_string()],
        CheatSource::PrimarySite,
    );
    hp.patch_version = Some("1.0.0".to_string());
    v100.add_cheat(hp);
    v100.add_cheat(Cheat::new(
        "[Stamina] Unlimited",
        vec![
            "580F0000 01234567".to_string(),
            "780F0000 00000010".to_string(),
        ],
        CheatSource::SecondaryApi,
    ));

    let v110 = Build::new(BuildId::new("1122334455667788"), "1.1.0");

    HarvestedTitle {
        title,
        builds: vec![v100, v110],
    }
}

#[test]
fn full_output_tree() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path().join("cheat_code"));
    let mut h = harvested();

    let outcome = persist_title(&layout, &mut h);
    assert_eq!(outcome.written, 2);
    assert_eq!(outcome.archives, 1);

    let title_dir = layout.title_dir(&h.title);
    assert_eq!(
        title_dir.file_name().and_then(|n| n.to_str()),
        Some("The Legend of ZeldaTM Breath of the Wild")
    );

    // The zero-cheat build leaves no trace on disk
    assert!(!layout.build_dir(&h.title, &h.builds[1].build_id).exists());
    assert!(!layout.archive_path(&h.title, &h.builds[1].build_id).exists());

    let folders = cheat_folders(&h.builds[0].cheats);
    assert_eq!(folders, vec!["Infinite Hearts", "Stamina Unlimited"]);
    for (cheat, folder) in h.builds[0].cheats.iter().zip(&folders) {
        let path = layout.cheat_file(&h.title, &h.builds[0].build_id, folder);
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("ABCDEF0123456789.txt")
        );
        let (name, codes) = read_cheat_file(&path).unwrap();
        assert_eq!(name, cheat.name);
        assert_eq!(codes, cheat.codes);
    }

    let page = write_title_page(&h, &layout).unwrap();
    let index = write_index(std::slice::from_ref(&h), &layout).unwrap();
    assert!(page.starts_with(&title_dir));
    assert_eq!(index, dir.path().join("cheat_code").join("index.html"));

    let index_html = std::fs::read_to_string(&index).unwrap();
    assert!(index_html.contains("ABCDEF0123456789"));
    assert!(!index_html.contains("1122334455667788"));
    assert!(index_html.contains("tinfoil.io, cheatslips.com"));
}

#[test]
fn wrapped_page_cells_round_trip_through_cheat_files() {
    let html = "<html><body><h4>Cheats</h4><div><table class=\"table\"><tbody>\
        <tr><td>[Infinite\n      Health]</td><td>1.0.0</td><td></td>\
        <td><ul class=\"cheat\"><li>04000000\n 00112233 00000063</li></ul></td></tr>\
        </tbody></table></div></body></html>";
    let rows = cheat_harvest_scraper::parse_detail_page(html).cheats.unwrap();
    let row = &rows[0];

    let mut build = Build::new(BuildId::new("ABCDEF0123456789"), "1.0.0");
    build.add_cheat(Cheat::new(row.name.clone(), row.codes.clone(), CheatSource::PrimarySite));
    let title = Title::new("0100000000010000", "Example Game");

    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    let outcome = persist_build(&layout, &title, &mut build).unwrap();
    assert_eq!(outcome.written, 1);

    let folder = &cheat_folders(&build.cheats)[0];
    assert_eq!(folder, "Infinite Health");
    let path = layout.cheat_file(&title, &build.build_id, folder);
    let (name, codes) = read_cheat_file(&path).unwrap();
    assert_eq!(name, "Infinite Health");
    assert_eq!(codes, vec!["04000000 00112233 00000063"]);
}
