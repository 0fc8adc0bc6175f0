//! Static HTML reports: one page per title plus an index of the whole run.
//!
//! Pages are self-contained apart from Bootstrap, jQuery and DataTables,
//! which load from public CDNs. Every link is relative so the output tree
//! can be moved or served as-is.

use std::fs;
use std::path::{Component, Path, PathBuf};

use cheat_harvest_core::{Build, HarvestedTitle};

use crate::FrontendError;
use crate::layout::OutputLayout;

const SITE_NAME: &str = "Switch Cheats";
const UNKNOWN: &str = "Unknown";

const HEAD_LINKS: &str = r#"    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css">
    <link rel="stylesheet" href="https://cdn.datatables.net/1.13.6/css/dataTables.bootstrap5.min.css">
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #333; margin-bottom: 30px; text-align: center; }
        .cheat-code { white-space: pre-wrap; font-family: monospace; background-color: #f8f9fa; padding: 10px; border-radius: 5px; }
        .header, .footer { background-color: #f8f9fa; padding: 20px; text-align: center; }
        .header { margin-bottom: 30px; }
        .footer { margin-top: 30px; }
        .download-button { margin: 5px 0; }
    </style>
"#;

const SCRIPTS: &str = r#"    <script src="https://code.jquery.com/jquery-3.7.0.min.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js"></script>
    <script src="https://cdn.datatables.net/1.13.6/js/jquery.dataTables.min.js"></script>
    <script src="https://cdn.datatables.net/1.13.6/js/dataTables.bootstrap5.min.js"></script>
"#;

/// DataTables setup with a dropdown filter row. `__TABLE__`, `__WIDTHS__`
/// and `__FILTERS__` are substituted per page.
const TABLE_SCRIPT: &str = r#"    <script>
        $(document).ready(function() {
            var table = $('#__TABLE__').DataTable({
                "order": [],
                "autoWidth": false,
                "columns": [__WIDTHS__]
            });
            var filters = [__FILTERS__];
            $('#__TABLE__ thead tr').clone(true).appendTo('#__TABLE__ thead');
            $('#__TABLE__ thead tr:eq(1) th').each(function (i) {
                var title = $(this).text();
                if (filters.indexOf(title) >= 0) {
                    $(this).html('<select class="form-select form-select-sm"><option value="">All</option></select>');
                    var select = $('select', this);
                    table.column(i).data().unique().sort().each(function (d) {
                        select.append($('<option>').val(d).text(d));
                    });
                    select.on('change', function () {
                        var val = $.fn.dataTable.util.escapeRegex($(this).val());
                        table.column(i).search(val ? '^' + val + '$' : '', true, false).draw();
                    });
                } else {
                    $(this).html('');
                }
            });
        });
    </script>
"#;

const TITLE_COLUMNS: &[(&str, u8)] = &[
    ("Build ID", 15),
    ("Version", 10),
    ("Source", 10),
    ("Cheat Name", 20),
    ("Codes", 35),
    ("Downloads", 10),
];
const TITLE_FILTERS: &[&str] = &["Build ID", "Version", "Source"];

const INDEX_COLUMNS: &[(&str, u8)] = &[
    ("Game Title", 25),
    ("Build ID", 20),
    ("Version", 10),
    ("Source", 15),
    ("Cheats Link", 15),
    ("Cheat Count", 10),
];
const INDEX_FILTERS: &[&str] = &["Game Title", "Build ID", "Version", "Source"];

/// Render the page for one title.
///
/// Builds without cheats are left out. Links point from the title
/// directory to each build's cheat directory and archive.
pub fn render_title_page(harvested: &HarvestedTitle, layout: &OutputLayout) -> String {
    let title = &harvested.title;
    let page_dir = layout.title_dir(title);
    let mut html = String::new();

    open_page(&mut html, &format!("{} - {}", title.display_name, SITE_NAME));
    header(&mut html, &title.display_name);

    html.push_str("<div class=\"container-fluid\">\n");
    html.push_str("<p>");
    detail_line(&mut html, "Game ID", &title.id);
    html.push_str("<br>\n");
    detail_line(&mut html, "Release Date", title.release_date.as_deref().unwrap_or(UNKNOWN));
    html.push_str("<br>\n");
    let size = title.size_bytes.map(human_size);
    detail_line(&mut html, "Size", size.as_deref().unwrap_or(UNKNOWN));
    html.push_str("<br>\n");
    detail_line(&mut html, "Publisher", title.publisher.as_deref().unwrap_or(UNKNOWN));
    html.push_str("</p>\n");

    open_table(&mut html, "cheatsTable", TITLE_COLUMNS);
    for build in harvested.builds.iter().filter(|b| b.has_cheats()) {
        let links = build_links(build, &page_dir);
        let sources = escape_html(&build.source_names());
        for cheat in &build.cheats {
            let mut block = format!("[{}]", cheat.name);
            for code in &cheat.codes {
                block.push('\n');
                block.push_str(code);
            }
            html.push_str("<tr>");
            cell(&mut html, &escape_html(build.build_id.as_str()));
            cell(&mut html, &escape_html(&build.version_label));
            cell(&mut html, &sources);
            cell(&mut html, &escape_html(&cheat.name));
            cell(
                &mut html,
                &format!("<div class=\"cheat-code\">{}</div>", escape_html(&block)),
            );
            cell(&mut html, &links);
            html.push_str("</tr>\n");
        }
    }
    close_table(&mut html);
    html.push_str("</div>\n");

    close_page(&mut html, "cheatsTable", TITLE_COLUMNS, TITLE_FILTERS);
    html
}

/// Render the run-wide index: one row per build with cheats.
pub fn render_index(titles: &[HarvestedTitle], layout: &OutputLayout) -> String {
    let root = layout.root();
    let mut html = String::new();

    open_page(&mut html, SITE_NAME);
    header(&mut html, SITE_NAME);

    html.push_str("<div class=\"container-fluid\">\n");
    open_table(&mut html, "gamesTable", INDEX_COLUMNS);
    for harvested in titles {
        let title = &harvested.title;
        let page_link = relative_link(root, &layout.title_index(title));
        let name = escape_html(&title.display_name);
        let title_cell = match page_link {
            Some(href) => format!("<a href=\"{}\">{}</a>", escape_html(&href), name),
            None => name,
        };

        for build in harvested.builds.iter().filter(|b| b.has_cheats()) {
            let download = build
                .archive_path
                .as_deref()
                .and_then(|p| relative_link(root, p))
                .map(|href| {
                    format!(
                        "<a class=\"btn btn-primary btn-sm download-button\" href=\"{}\">Download</a>",
                        escape_html(&href)
                    )
                })
                .unwrap_or_else(|| "No Download".to_string());

            html.push_str("<tr>");
            cell(&mut html, &title_cell);
            cell(&mut html, &escape_html(build.build_id.as_str()));
            cell(&mut html, &escape_html(&build.version_label));
            cell(&mut html, &escape_html(&build.source_names()));
            cell(&mut html, &download);
            cell(&mut html, &build.cheats.len().to_string());
            html.push_str("</tr>\n");
        }
    }
    close_table(&mut html);
    html.push_str("</div>\n");

    close_page(&mut html, "gamesTable", INDEX_COLUMNS, INDEX_FILTERS);
    html
}

/// Write a title's `index.html` into its directory. Returns the path written.
pub fn write_title_page(
    harvested: &HarvestedTitle,
    layout: &OutputLayout,
) -> Result<PathBuf, FrontendError> {
    let path = layout.title_index(&harvested.title);
    write_page(&path, &render_title_page(harvested, layout))?;
    Ok(path)
}

/// Write the root `index.html`. Returns the path written.
pub fn write_index(
    titles: &[HarvestedTitle],
    layout: &OutputLayout,
) -> Result<PathBuf, FrontendError> {
    let path = layout.root_index();
    write_page(&path, &render_index(titles, layout))?;
    Ok(path)
}

fn write_page(path: &Path, html: &str) -> Result<(), FrontendError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FrontendError::write(parent, e))?;
    }
    fs::write(path, html).map_err(|e| FrontendError::write(path, e))
}

fn build_links(build: &Build, page_dir: &Path) -> String {
    let dir = build
        .cheat_dir
        .as_deref()
        .and_then(|p| relative_link(page_dir, p))
        .map(|href| format!("<a href=\"{}\">Cheat Directory</a>", escape_html(&href)));
    let zip = build
        .archive_path
        .as_deref()
        .and_then(|p| relative_link(page_dir, p))
        .map(|href| {
            format!(
                "<a class=\"btn btn-primary btn-sm download-button\" href=\"{}\">Download Zip</a>",
                escape_html(&href)
            )
        });
    [dir, zip].into_iter().flatten().collect::<Vec<_>>().join("<br>")
}

/// Relative, percent-encoded link from `from_dir` to `target`.
///
/// `None` when no relative path exists (e.g. one path absolute, the other
/// not) or a segment is not valid UTF-8.
pub fn relative_link(from_dir: &Path, target: &Path) -> Option<String> {
    let rel = pathdiff::diff_paths(target, from_dir)?;
    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::ParentDir => segments.push("..".to_string()),
            Component::CurDir => {}
            Component::Normal(s) => segments.push(urlencoding::encode(s.to_str()?).into_owned()),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(segments.join("/"))
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `1536` -> `"1.50 KB"`. Binary units, two decimals above bytes.
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

fn open_page(html: &mut String, page_title: &str) {
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <title>");
    html.push_str(&escape_html(page_title));
    html.push_str("</title>\n");
    html.push_str(HEAD_LINKS);
    html.push_str("</head>\n<body>\n");
}

fn header(html: &mut String, heading: &str) {
    html.push_str("<div class=\"header\">\n    <h1>");
    html.push_str(&escape_html(heading));
    html.push_str("</h1>\n</div>\n");
}

fn detail_line(html: &mut String, label: &str, value: &str) {
    html.push_str("<strong>");
    html.push_str(label);
    html.push_str(":</strong> ");
    html.push_str(&escape_html(value));
}

fn open_table(html: &mut String, id: &str, columns: &[(&str, u8)]) {
    html.push_str("<table id=\"");
    html.push_str(id);
    html.push_str("\" class=\"table table-striped table-bordered\" style=\"width:100%\">\n<thead>\n<tr>");
    for (name, _) in columns {
        html.push_str("<th>");
        html.push_str(name);
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
}

fn close_table(html: &mut String) {
    html.push_str("</tbody>\n</table>\n");
}

fn cell(html: &mut String, content: &str) {
    html.push_str("<td>");
    html.push_str(content);
    html.push_str("</td>");
}

fn close_page(html: &mut String, table_id: &str, columns: &[(&str, u8)], filters: &[&str]) {
    html.push_str("<div class=\"footer\">\n    <p>Generated ");
    html.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M").to_string());
    html.push_str("</p>\n</div>\n");
    html.push_str(SCRIPTS);

    let widths = columns
        .iter()
        .map(|(_, w)| format!("{{ \"width\": \"{w}%\" }}"))
        .collect::<Vec<_>>()
        .join(", ");
    let filters = filters
        .iter()
        .map(|f| format!("'{f}'"))
        .collect::<Vec<_>>()
        .join(", ");
    html.push_str(
        &TABLE_SCRIPT
            .replace("__TABLE__", table_id)
            .replace("__WIDTHS__", &widths)
            .replace("__FILTERS__", &filters),
    );
    html.push_str("</body>\n</html>\n");
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
