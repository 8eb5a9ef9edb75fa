//! Summary tables printed by `kgs-specimen hierarchy --summary`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kgs_hierarchy::KindTable;
use kgs_model::{HierarchyIssue, Legend, SpecimenHierarchy, SpecimenOverview, TargetInternalReference};

pub fn print_summary(result: &SpecimenHierarchy) {
    println!(
        "Hierarchy: {} nodes below \"{}\"",
        result.hierarchy.node_count() - 1,
        result.hierarchy.title.as_deref().unwrap_or_default()
    );
    println!("{}", counts_table(&result.overview));
    if let Some(table) = characteristics_table(&result.overview) {
        println!();
        println!("Characteristics:");
        println!("{table}");
    }
    if !result.legend.is_empty() {
        println!();
        println!("Legend:");
        println!("{}", legend_table(&result.legend));
    }
    if !result.issues.is_empty() {
        println!();
        println!("Issues:");
        println!("{}", issues_table(&result.issues));
    }
}

/// Specimen counts per kind.
pub fn counts_table(overview: &SpecimenOverview) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Specimen")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Subjects", &overview.number_of_subjects),
        ("Subject groups", &overview.number_of_subject_groups),
        ("Tissue samples", &overview.number_of_tissue_samples),
        ("Tissue sample collections", &overview.number_of_tissue_sample_collections),
    ];
    let mut total = 0usize;
    for (label, count) in rows {
        let count = count.as_ref().and_then(|c| c.as_str().parse::<usize>().ok());
        total += count.unwrap_or_default();
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Species, sex, strain, genetic strain type and pathology counts; `None` when empty.
pub fn characteristics_table(overview: &SpecimenOverview) -> Option<Table> {
    let groups = [
        ("Species", &overview.species),
        ("Sex", &overview.sex),
        ("Strain", &overview.strains),
        ("Genetic strain type", &overview.genetic_strain_types),
        ("Pathology", &overview.pathology),
    ];
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Characteristic"),
        header_cell("Value"),
        header_cell("Used by"),
    ]);
    apply_table_style(&mut table);
    let mut rows = 0;
    for (label, references) in groups {
        for reference in references.iter().flatten() {
            table.add_row(vec![
                Cell::new(label).fg(Color::Blue),
                Cell::new(reference_label(reference)),
                Cell::new(reference.count.as_deref().unwrap_or_default().join(", ")),
            ]);
            rows += 1;
        }
    }
    for location in &overview.anatomical_locations_of_tissue_samples {
        table.add_row(vec![
            Cell::new("Anatomical location").fg(Color::Blue),
            Cell::new(reference_label(location)),
            dim_cell("-"),
        ]);
        rows += 1;
    }
    (rows > 0).then_some(table)
}

pub fn legend_table(legend: &Legend) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Label"), header_cell("Color")]);
    apply_table_style(&mut table);
    for (color, label) in legend.entries() {
        table.add_row(vec![Cell::new(label), Cell::new(color)]);
    }
    table
}

pub fn issues_table(issues: &[HierarchyIssue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Instance"), header_cell("Message")]);
    apply_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            Cell::new(&issue.instance).fg(Color::Red),
            Cell::new(&issue.message),
        ]);
    }
    table
}

/// Kind table as listed by `kgs-specimen kinds`.
pub fn kinds_table(kinds: &KindTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Prefix"),
        header_cell("Specimen type"),
        header_cell("Color"),
        header_cell("State type"),
        header_cell("State color"),
    ]);
    apply_table_style(&mut table);
    for entry in kinds.entries() {
        table.add_row(vec![
            Cell::new(entry.kind.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.prefix),
            Cell::new(&entry.specimen_type),
            Cell::new(&entry.specimen_color),
            Cell::new(&entry.state_type),
            Cell::new(&entry.state_color),
        ]);
    }
    table
}

fn reference_label(reference: &TargetInternalReference) -> &str {
    reference
        .value
        .as_deref()
        .or(reference.reference.as_deref())
        .unwrap_or("-")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).add_attribute(Attribute::Bold),
        _ => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
