//! Rendering for the `--output` flag.
//!
//! List views hand each item to a `Tabled` row type; single views hand the
//! whole value to a pre-formatted detail block. Structured formats (`json`,
//! `yaml`) serialize the domain value itself rather than the table rows, so
//! scripted consumers are insulated from table-layout changes; `plain`
//! emits bare identifiers for shell pipelines.

use std::io::{self, IsTerminal, Write};

use tabled::{settings::Style, Table, Tabled};

use crate::cli::{ColorMode, OutputFormat};

impl ColorMode {
    /// Whether escape codes should be written, honoring `NO_COLOR`.
    pub fn enabled(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal(),
        }
    }
}

impl OutputFormat {
    /// Render a list view: one table row per item, or one id per line for
    /// `plain`.
    pub fn render_rows<T, R>(
        &self,
        items: &[T],
        row: impl Fn(&T) -> R,
        id: impl Fn(&T) -> String,
    ) -> String
    where
        T: serde::Serialize,
        R: Tabled,
    {
        match self {
            Self::Table => {
                let rows: Vec<R> = items.iter().map(row).collect();
                Table::new(&rows).with(Style::rounded()).to_string()
            }
            Self::Plain => items.iter().map(id).collect::<Vec<_>>().join("\n"),
            structured => structured.serialize(items),
        }
    }

    /// Render a single-item view. `detail` supplies the human layout for
    /// `table`; `id` supplies the `plain` form.
    pub fn render_detail<T>(
        &self,
        item: &T,
        detail: impl FnOnce(&T) -> String,
        id: impl FnOnce(&T) -> String,
    ) -> String
    where
        T: serde::Serialize,
    {
        match self {
            Self::Table => detail(item),
            Self::Plain => id(item),
            structured => structured.serialize(item),
        }
    }

    fn serialize<T: serde::Serialize + ?Sized>(&self, value: &T) -> String {
        match self {
            Self::JsonCompact => {
                serde_json::to_string(value).expect("in-memory value serializes")
            }
            Self::Yaml => serde_yaml::to_string(value).expect("in-memory value serializes"),
            _ => serde_json::to_string_pretty(value).expect("in-memory value serializes"),
        }
    }
}

/// Write a rendered view to stdout, unless `--quiet` suppressed it.
pub fn emit(rendered: &str, quiet: bool) {
    if quiet || rendered.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{rendered}");
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use tabled::Tabled;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: String,
        label: String,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: "a1".into(),
                label: "first".into(),
            },
            Item {
                id: "a2".into(),
                label: "second".into(),
            },
        ]
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        let out = OutputFormat::Plain.render_rows(
            &items(),
            |i| ItemRow { id: i.id.clone() },
            |i| i.id.clone(),
        );
        assert_eq!(out, "a1\na2");
    }

    #[test]
    fn structured_formats_serialize_the_value_not_the_rows() {
        let out = OutputFormat::JsonCompact.render_rows(
            &items(),
            |i| ItemRow { id: i.id.clone() },
            |i| i.id.clone(),
        );
        // `label` never appears in any table row, but survives in JSON.
        assert!(out.contains("\"label\":\"first\""));

        let out = OutputFormat::Yaml.render_rows(
            &items(),
            |i| ItemRow { id: i.id.clone() },
            |i| i.id.clone(),
        );
        assert!(out.contains("label: second"));
    }

    #[test]
    fn table_detail_uses_the_supplied_block() {
        let item = Item {
            id: "a1".into(),
            label: "first".into(),
        };
        let out =
            OutputFormat::Table.render_detail(&item, |i| format!("Label: {}", i.label), |i| {
                i.id.clone()
            });
        assert_eq!(out, "Label: first");

        let out = OutputFormat::Plain.render_detail(
            &item,
            |i| format!("Label: {}", i.label),
            |i| i.id.clone(),
        );
        assert_eq!(out, "a1");
    }
}
