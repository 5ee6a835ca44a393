//! Terminal rendering of pages, tables and search results.

use std::fmt::Write as _;
use std::path::Path;

use biostudy_core::{Corpus, KnowledgeRow, MasteryTracker, SearchHit};
use biostudy_lab::SequenceStats;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn page_cell(page: usize) -> Cell {
    Cell::new(page).set_alignment(CellAlignment::Right)
}

/// One row per page of the corpus.
pub fn topics_table(corpus: &Corpus, mastery: &MasteryTracker) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Page"),
        header_cell("Topic"),
        header_cell("Section"),
        header_cell("Points"),
        header_cell("Diagram"),
        header_cell("Mastered"),
    ]);
    apply_table_style(&mut table);

    for (index, row) in corpus.iter().enumerate() {
        let diagram = if row.image_path.is_some() {
            Cell::new("yes")
        } else {
            dim_cell("-")
        };
        let mastered = if mastery.is_mastered(index) {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            page_cell(index + 1),
            Cell::new(&row.topic),
            Cell::new(&row.section),
            Cell::new(row.ten_points.len()),
            diagram,
            mastered,
        ]);
    }
    table
}

fn match_label(hit: &SearchHit) -> &'static str {
    match (hit.matched_in_text, hit.matched_in_image) {
        (true, true) => "text + diagram",
        (false, true) => "diagram",
        _ => "text",
    }
}

/// Search hits numbered from 1, the number `open N` accepts.
pub fn hits_table(corpus: &Corpus, hits: &[SearchHit]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Page"),
        header_cell("Topic"),
        header_cell("Matched in"),
    ]);
    apply_table_style(&mut table);

    for (number, hit) in hits.iter().enumerate() {
        let topic = corpus
            .get(hit.row_index)
            .map_or_else(|| dim_cell("(no longer available)"), |row| Cell::new(&row.topic));
        let matched = if hit.matched_in_image {
            Cell::new(match_label(hit)).fg(Color::Yellow)
        } else {
            Cell::new(match_label(hit))
        };
        table.add_row(vec![
            dim_cell(number + 1),
            page_cell(hit.page()),
            topic,
            matched,
        ]);
    }
    table
}

pub fn stats_table(stats: &SequenceStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    let rows = [
        ("Length", stats.length.to_string()),
        ("A", stats.a.to_string()),
        ("C", stats.c.to_string()),
        ("G", stats.g.to_string()),
        ("T", stats.t.to_string()),
        ("N", stats.n.to_string()),
        ("GC %", format!("{:.2}", stats.gc_percent)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Machine-readable form of one search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitRecord {
    pub page: usize,
    pub topic: String,
    pub section: String,
    pub matched_in_text: bool,
    pub matched_in_image: bool,
}

pub fn hit_records(corpus: &Corpus, hits: &[SearchHit]) -> Vec<HitRecord> {
    hits.iter()
        .map(|hit| {
            let row = corpus.get(hit.row_index);
            HitRecord {
                page: hit.page(),
                topic: row.map(|row| row.topic.clone()).unwrap_or_default(),
                section: row.map(|row| row.section.clone()).unwrap_or_default(),
                matched_in_text: hit.matched_in_text,
                matched_in_image: hit.matched_in_image,
            }
        })
        .collect()
}

/// Plain-text page view.
pub fn render_page(label: &str, row: &KnowledgeRow, mastered: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{label}");
    let _ = writeln!(out, "== {} ==", row.topic);
    if !row.section.is_empty() {
        let _ = writeln!(out, "Section: {}", row.section);
    }
    if !row.explanation.is_empty() {
        let _ = writeln!(out, "\n{}", row.explanation);
    }
    if !row.detailed_explanation.is_empty() {
        let _ = writeln!(out, "\nDetails:\n{}", row.detailed_explanation);
    }
    if !row.ten_points.is_empty() {
        let _ = writeln!(out, "\nRevision points:");
        for (number, point) in row.ten_points.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {point}", number + 1);
        }
    }
    if let Some(image) = &row.image_path {
        if Path::new(image).is_file() {
            let _ = writeln!(out, "\nDiagram: {image}");
        } else {
            let _ = writeln!(out, "\nDiagram: {image} (file not found)");
        }
    }
    if mastered {
        let _ = writeln!(out, "\n[mastered]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page() {
        let row = KnowledgeRow::new("PCR", "amplifies DNA")
            .with_section("Ch 4")
            .with_points("denature\nanneal\nextend")
            .with_image("missing/pcr.png");
        insta::assert_snapshot!(render_page("Page 1 of 3", &row, true), @r"
        Page 1 of 3
        == PCR ==
        Section: Ch 4

        amplifies DNA

        Revision points:
          1. denature
          2. anneal
          3. extend

        Diagram: missing/pcr.png (file not found)

        [mastered]
        ");
    }

    #[test]
    fn test_minimal_page_omits_empty_sections() {
        let row = KnowledgeRow::new("Ligase", "");
        assert_eq!(render_page("Page 2 of 2", &row, false), "Page 2 of 2\n== Ligase ==\n");
    }

    #[test]
    fn test_hit_records_for_stale_hit() {
        let corpus = Corpus::new(vec![KnowledgeRow::new("PCR", "amplifies DNA")], "test");
        let hits = [
            SearchHit {
                row_index: 0,
                matched_in_text: true,
                matched_in_image: false,
            },
            SearchHit {
                row_index: 5,
                matched_in_text: false,
                matched_in_image: true,
            },
        ];
        let records = hit_records(&corpus, &hits);
        assert_eq!(records[0].page, 1);
        assert_eq!(records[0].topic, "PCR");
        assert_eq!(records[1].page, 6);
        assert!(records[1].topic.is_empty());
    }

    #[test]
    fn test_match_labels() {
        let hit = |text, image| SearchHit {
            row_index: 0,
            matched_in_text: text,
            matched_in_image: image,
        };
        assert_eq!(match_label(&hit(true, false)), "text");
        assert_eq!(match_label(&hit(false, true)), "diagram");
        assert_eq!(match_label(&hit(true, true)), "text + diagram");
    }
}
