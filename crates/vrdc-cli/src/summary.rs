use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vrdc_catalog::SettingSummary;
use vrdc_map::{ExtractSummary, LevelFields, MonthlyExtract};
use vrdc_model::{BenefitSetting, IdentifierLevel, SettingDefinition, TableRole};

use vrdc_cli::output::PlanRow;

pub fn settings_table(summaries: &[SettingSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Setting"),
        header_cell("Format"),
        header_cell("TIN"),
        header_cell("CCN"),
        header_cell("Org NPI"),
        header_cell("Personal NPI"),
        header_cell("Plans"),
    ]);
    apply_table_style(&mut table);
    for column in 2..=6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for summary in summaries {
        let mut row = vec![
            Cell::new(&summary.setting).add_attribute(Attribute::Bold),
            Cell::new(summary.format),
        ];
        for level in IdentifierLevel::ALL {
            let count = summary.level(level).map_or(0, |entry| entry.count);
            row.push(count_cell(count));
        }
        row.push(Cell::new(summary.permutations).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    table
}

pub fn fields_table(definition: &SettingDefinition) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Table"),
        header_cell("Column"),
        header_cell("Alias"),
    ]);
    apply_table_style(&mut table);
    for level in IdentifierLevel::ALL {
        if !definition.has_level(level) {
            table.add_row(vec![
                Cell::new(level),
                dim_cell("-"),
                dim_cell("(absent)"),
                dim_cell("-"),
            ]);
            continue;
        }
        for table_role in TableRole::ALL {
            for field in definition.fields_for(level, table_role) {
                let alias = if field.is_renamed() {
                    Cell::new(&field.alias_column).fg(Color::Yellow)
                } else {
                    Cell::new(&field.alias_column)
                };
                table.add_row(vec![
                    Cell::new(level),
                    Cell::new(table_role.sql_prefix()),
                    Cell::new(&field.source_column),
                    alias,
                ]);
            }
        }
    }
    table
}

pub fn level_table(level: IdentifierLevel, entries: &[LevelFields<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Setting"),
        header_cell(&format!("{level} fields")),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        let fields: Vec<String> = entry
            .fields
            .iter()
            .map(|field| format!("{} AS {}", field.qualified_name(), field.alias_column))
            .collect();
        table.add_row(vec![
            Cell::new(entry.setting).add_attribute(Attribute::Bold),
            Cell::new(fields.join("\n")),
        ]);
    }
    table
}

pub fn plans_table(rows: &[PlanRow]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(IdentifierLevel::ALL.iter().map(|level| header_cell(level.as_str())));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in rows {
        let mut cells = vec![Cell::new(row.plan)];
        for level in IdentifierLevel::ALL {
            cells.push(match row.value(level) {
                Some(value) => Cell::new(value),
                None => dim_cell("NULL"),
            });
        }
        table.add_row(cells);
    }
    table
}

pub fn extracts_table(extracts: &[MonthlyExtract]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Setting"),
        header_cell("Database"),
        header_cell("Claim table"),
        header_cell("Line table"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    for extract in extracts {
        table.add_row(vec![
            Cell::new(extract.period),
            Cell::new(extract.setting).add_attribute(Attribute::Bold),
            Cell::new(&extract.tables.database),
            Cell::new(&extract.tables.claim_table),
            Cell::new(&extract.tables.line_table),
            Cell::new(extract.projection.len()),
        ]);
    }
    table
}

pub fn print_extract_summary(summary: &ExtractSummary) {
    let settings: Vec<&str> = summary.settings.iter().map(BenefitSetting::as_str).collect();
    println!("Range: {}", summary.month_range);
    println!("Settings: {}", settings.join(", "));
    println!(
        "Months: {}  Settings: {}  Combinations: {}",
        summary.total_months, summary.total_settings, summary.total_combinations
    );
}

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

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
