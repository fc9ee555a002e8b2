use std::fmt::Display;
use std::io::Write;

use crate::types::{FullResult, OutputFormat, Verb};

mod json;
mod pretty;

pub enum Formatter {
    Pretty(pretty::Pretty),
    Json(json::Json),
}

impl Formatter {
    /// Rows are ordered by resource display name.
    pub fn new(format: OutputFormat, verbs: &[Verb], mut result: FullResult, color: bool) -> Self {
        result
            .items
            .sort_by_cached_key(|item| item.resource.to_string());
        match format {
            OutputFormat::Json => Formatter::Json(json::Json::new(verbs, result)),
            OutputFormat::IconTable => Formatter::Pretty(pretty::Pretty::new(
                pretty::Glyphs::Icon,
                verbs,
                result,
                color,
            )),
            OutputFormat::AsciiTable => Formatter::Pretty(pretty::Pretty::new(
                pretty::Glyphs::Ascii,
                verbs,
                result,
                false,
            )),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self)?;
        out.flush()
    }
}

impl Display for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formatter::Pretty(p) => p.fmt(f),
            Formatter::Json(j) => j.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Access, GroupResource, ResourceCheckResult};

    fn result() -> FullResult {
        let row = |group: &str, resource: &str, cells: &[(Verb, Access)]| ResourceCheckResult {
            resource: GroupResource::new(group, resource),
            items: cells.iter().copied().collect(),
        };
        FullResult {
            items: vec![
                row(
                    "",
                    "secrets",
                    &[(Verb::Get, Access::Denied), (Verb::List, Access::Unknown)],
                ),
                row(
                    "apps",
                    "deployments",
                    &[(Verb::Get, Access::Allowed), (Verb::List, Access::Allowed)],
                ),
            ],
        }
    }

    fn render(format: OutputFormat) -> String {
        let mut out = Vec::new();
        Formatter::new(format, &[Verb::Get, Verb::List], result(), false)
            .write_to(&mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn rows(output: &str) -> Vec<Vec<String>> {
        output
            .lines()
            .map(|l| l.split_whitespace().map(String::from).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect()
    }

    #[test]
    fn ascii_table_uses_words() {
        assert_eq!(
            rows(&render(OutputFormat::AsciiTable)),
            vec![
                vec!["NAME", "GET", "LIST"],
                vec!["deployments.apps", "yes", "yes"],
                vec!["secrets", "no", "ERR"],
            ]
        );
    }

    #[test]
    fn icon_table_uses_glyphs() {
        assert_eq!(
            rows(&render(OutputFormat::IconTable)),
            vec![
                vec!["NAME", "GET", "LIST"],
                vec!["deployments.apps", "✔", "✔"],
                vec!["secrets", "✖", "?"],
            ]
        );
    }

    #[test]
    fn uncolored_output_has_no_escape_codes() {
        assert!(!render(OutputFormat::IconTable).contains('\u{1b}'));
    }

    #[test]
    fn json_lists_every_cell() {
        let value: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "items": [
                    {
                        "group": "apps",
                        "resource": "deployments",
                        "verbs": { "get": "allowed", "list": "allowed" }
                    },
                    {
                        "group": "",
                        "resource": "secrets",
                        "verbs": { "get": "denied", "list": "unknown" }
                    }
                ]
            })
        );
    }
}
