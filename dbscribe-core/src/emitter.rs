//! Go source emission.
//!
//! Renders one table into one Go source file: package clause, optional
//! import block, then the struct declaration. This module only
//! assembles text; formatting with gofmt and writing to disk are the
//! caller's concern.

use crate::config::GenerationConfig;
use crate::gotype::map_go_type;
use crate::models::Table;
use crate::tags::generate_tags;

/// Import path required when a structable `Recorder` is embedded.
const STRUCTABLE_IMPORT: &str = "github.com/Masterminds/structable";

/// One rendered Go source file, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Bare file name, derived from the struct name.
    pub file_name: String,
    /// Complete Go source text.
    pub content: String,
}

/// Renders one table into Go source.
///
/// The struct name is the naming transform applied to the concatenation
/// of prefix, table name, and suffix, so the whole identifier receives
/// exactly one export transformation. Imports are collected from the
/// chosen field types, deduplicated, and emitted in sorted order; a
/// table needing no imports gets no import block at all.
pub fn render_table(table: &Table, config: &GenerationConfig) -> GeneratedFile {
    let struct_name = config
        .naming
        .apply(&format!("{}{}{}", config.prefix, table.name, config.suffix));

    let mut imports: Vec<&'static str> = Vec::new();
    let mut fields = String::new();

    for column in &table.columns {
        let field_type = map_go_type(column.category, column.is_nullable);
        if let Some(import) = field_type.import
            && !imports.contains(&import)
        {
            imports.push(import);
        }

        fields.push('\t');
        fields.push_str(&config.naming.apply(&column.name));
        fields.push(' ');
        fields.push_str(field_type.go_type);
        fields.push_str(&generate_tags(column, &config.tags));
        fields.push('\n');
    }

    if config.structable_recorder {
        if !imports.contains(&STRUCTABLE_IMPORT) {
            imports.push(STRUCTABLE_IMPORT);
        }
        fields.push_str("\n\tstructable.Recorder\n");
    }

    imports.sort_unstable();

    let mut content = String::new();
    content.push_str("package ");
    content.push_str(&config.package);
    content.push_str("\n\n");

    if !imports.is_empty() {
        content.push_str("import (\n");
        for import in &imports {
            content.push_str("\t\"");
            content.push_str(import);
            content.push_str("\"\n");
        }
        content.push_str(")\n\n");
    }

    content.push_str("type ");
    content.push_str(&struct_name);
    content.push_str(" struct {\n");
    content.push_str(&fields);
    content.push_str("}\n");

    GeneratedFile {
        file_name: format!("{struct_name}.go"),
        content,
    }
}
