use comfy_table::{ContentArrangement, Table, presets::ASCII_FULL};
use deskdb_core::{
    db::{SearchResult, SearchResults},
    obs::EventState,
};
use std::io::{self, Write};

///
/// OutputFormat
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub const NO_RESULTS: &str = "*** No results found ***";

/// Two-column table for one result set.
#[must_use]
pub fn result_table(result: &SearchResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    for row in &result.rows {
        table.add_row(vec![row.label.as_str(), row.value.as_str()]);
    }

    table
}

/// Print every result set, numbered from 1, or the no-results line.
pub fn write_results<W: Write>(
    out: &mut W,
    results: Option<&SearchResults>,
    format: OutputFormat,
) -> io::Result<()> {
    let Some(results) = results else {
        return writeln!(out, "{NO_RESULTS}\n");
    };

    for (i, result) in results.iter().enumerate() {
        writeln!(out, "Result set {}", i + 1)?;
        match format {
            OutputFormat::Table => writeln!(out, "{}", result_table(result))?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &result.rows)?;
                writeln!(out)?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Counter report printed on exit with `--stats`.
#[must_use]
pub fn stats_table(state: &EventState) -> Table {
    let ops = &state.ops;
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(vec!["Counter", "Value"]);

    for (name, value) in [
        ("loads", ops.loads),
        ("rows_loaded", ops.rows_loaded),
        ("reloads", ops.reloads),
        ("reload_failures", ops.reload_failures),
        ("searches", ops.searches),
        ("plan_by_id", ops.plan_by_id),
        ("plan_full_scan", ops.plan_full_scan),
        ("rows_scanned", ops.rows_scanned),
        ("dangling_references", ops.dangling_references),
    ] {
        table.add_row(vec![name.to_string(), value.to_string()]);
    }

    for (entity, counters) in &state.entities {
        table.add_row(vec![
            format!("{entity}.searches"),
            counters.searches.to_string(),
        ]);
        table.add_row(vec![
            format!("{entity}.rows_scanned"),
            counters.rows_scanned.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskdb_core::{
        db::{Db, MemorySource, RawRecord},
        model::EntityTag,
        value::Value,
    };

    // ---- helpers ----

    fn results() -> SearchResults {
        let mut org = RawRecord::new();
        org.insert("_id".into(), 1.into());
        org.insert("name".into(), "Acme".into());

        let db = Db::open(&MemorySource::new().with(EntityTag::Organization, vec![org]))
            .expect("loads");

        db.search("name", &Value::text("acme"), EntityTag::Organization)
            .expect("declared field")
            .expect("matches")
    }

    fn render(results: Option<&SearchResults>, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_results(&mut out, results, format).expect("write to vec");

        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn empty_result_prints_the_no_results_line() {
        assert_eq!(render(None, OutputFormat::Table), format!("{NO_RESULTS}\n\n"));
    }

    #[test]
    fn tables_are_numbered_and_list_every_field() {
        let text = render(Some(&results()), OutputFormat::Table);

        assert!(text.starts_with("Result set 1\n"));
        assert!(text.contains("Field"));
        assert!(text.contains("Acme"));
        assert!(text.contains("domain_names"));
        assert!(!text.contains("Result set 2"));
    }

    #[test]
    fn json_output_is_an_array_of_rows() {
        let text = render(Some(&results()), OutputFormat::Json);
        let json_start = text.find('[').expect("json array");
        let json_end = text.rfind(']').expect("json array end");
        let rows: serde_json::Value =
            serde_json::from_str(&text[json_start..=json_end]).expect("valid json");

        assert_eq!(rows[4]["label"], "name");
        assert_eq!(rows[4]["value"], "Acme");
    }
}
