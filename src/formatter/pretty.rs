use crate::types::{Access, FullResult, Verb};

use comfy_table::{presets::NOTHING, Attribute, Cell, CellAlignment, Color, Table};
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyphs {
    Icon,
    Ascii,
}

impl Glyphs {
    fn cell(self, access: Access) -> Cell {
        let icon = |text: &str, color: Color| {
            Cell::new(text)
                .fg(color)
                .set_alignment(CellAlignment::Center)
        };
        match (self, access) {
            (Glyphs::Icon, Access::Allowed) => icon("✔", Color::AnsiValue(34)),
            (Glyphs::Icon, Access::Denied) => icon("✖", Color::Red),
            (Glyphs::Icon, Access::Unknown) => icon("?", Color::Magenta),
            (Glyphs::Ascii, Access::Allowed) => Cell::new("yes"),
            (Glyphs::Ascii, Access::Denied) => Cell::new("no"),
            (Glyphs::Ascii, Access::Unknown) => Cell::new("ERR"),
        }
    }
}

pub struct Pretty {
    glyphs: Glyphs,
    verbs: Vec<Verb>,
    result: FullResult,
    color: bool,
}

impl Pretty {
    pub fn new(glyphs: Glyphs, verbs: &[Verb], result: FullResult, color: bool) -> Self {
        Self {
            glyphs,
            verbs: verbs.to_vec(),
            result,
            color,
        }
    }
}

impl Display for Pretty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table.load_preset(NOTHING);
        if self.color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        let column_count = self.verbs.len() + 1;

        let mut titles = Vec::with_capacity(column_count);
        titles.push(Cell::new("NAME").add_attribute(Attribute::Bold));
        titles.extend(
            self.verbs
                .iter()
                .map(|v| Cell::new(v.as_str().to_uppercase()).add_attribute(Attribute::Bold))
                .collect::<Vec<Cell>>(),
        );
        table.set_header(titles);

        self.result.items.iter().for_each(|result| {
            let mut row: Vec<Cell> = Vec::with_capacity(column_count);
            row.push(Cell::new(&result.resource));
            row.extend(
                self.verbs
                    .iter()
                    .map(|v| match result.items.get(v) {
                        Some(access) => self.glyphs.cell(*access),
                        None => Cell::new(""),
                    })
                    .collect::<Vec<Cell>>(),
            );
            table.add_row(row);
        });

        table.fmt(f)
    }
}
